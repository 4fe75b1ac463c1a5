//! Error types for conflict-engine operations.
//!
//! Overlap and conflict checks are total and never fail. Errors only come
//! from loading a schedule snapshot.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Entry {index} has no teacher_id")]
    MissingTeacher { index: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
