//! # conflict-engine
//!
//! Teacher schedule conflict detection over free-form class period strings.
//!
//! Class periods are typed by people, so they look like `"MWF 07:30-08:30"`,
//! `"TTh 1:00-2:00"`, `"Daily 08:00-09:00"` or `"Room 204 TBA"`. This crate
//! reads what it can from that text and answers one question: is this
//! teacher already booked at that time?
//!
//! Everything here is pure and synchronous. Callers pass in the snapshot of
//! existing entries; nothing is cached between calls.
//!
//! ## Modules
//!
//! - [`timespec`] — Parse a time-spec into days and a minute range
//! - [`overlap`] — Decide whether two time-specs collide
//! - [`entry`] — Schedule entries (teacher, time-spec, subject, owner)
//! - [`conflict`] — Find colliding entries for a proposed assignment
//! - [`snapshot`] — Load existing entries from JSON
//! - [`error`] — Error types

pub mod conflict;
pub mod entry;
pub mod error;
pub mod overlap;
pub mod snapshot;
pub mod timespec;

pub use conflict::{find_all_conflicts, find_conflict, Conflict};
pub use entry::ScheduleEntry;
pub use error::EngineError;
pub use overlap::{overlap_minutes, time_specs_overlap};
pub use snapshot::{load_snapshot, read_snapshot};
pub use timespec::{normalize, DaySet, TimeSpec};
