//! Load a snapshot of existing schedule entries from JSON.
//!
//! Two layouts are accepted:
//!
//! - a flat array of entries:
//!   `[{"teacher_id": "T1", "time_spec": "MWF 08:30-09:30", "owner_context": "classA"}]`
//! - an object keyed by owner context, each holding that class's rows:
//!   `{"classA": [{"teacher_id": "T1", "time_spec": "MWF 08:30-09:30"}]}`
//!
//! In the keyed layout a row without its own `owner_context` takes the key.
//! Key order is preserved, which matters because conflict lookup reports
//! the first collision in snapshot order.

use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::entry::ScheduleEntry;
use crate::error::{EngineError, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDoc {
    Flat(Vec<ScheduleEntry>),
    ByOwner(Map<String, Value>),
}

/// Parse a snapshot from a JSON string.
///
/// # Errors
///
/// [`EngineError::InvalidSnapshot`] if the JSON does not match either
/// layout, [`EngineError::MissingTeacher`] if an entry has a blank
/// `teacher_id`.
pub fn load_snapshot(json: &str) -> Result<Vec<ScheduleEntry>> {
    let doc: SnapshotDoc =
        serde_json::from_str(json).map_err(|e| EngineError::InvalidSnapshot(e.to_string()))?;
    flatten(doc)
}

/// Parse a snapshot from any reader (a file, stdin).
pub fn read_snapshot<R: Read>(reader: R) -> Result<Vec<ScheduleEntry>> {
    let doc: SnapshotDoc = serde_json::from_reader(reader)
        .map_err(|e| EngineError::InvalidSnapshot(e.to_string()))?;
    flatten(doc)
}

fn flatten(doc: SnapshotDoc) -> Result<Vec<ScheduleEntry>> {
    let entries = match doc {
        SnapshotDoc::Flat(entries) => entries,
        SnapshotDoc::ByOwner(map) => {
            let mut entries = Vec::new();
            for (owner, rows) in map {
                let rows: Vec<ScheduleEntry> = serde_json::from_value(rows).map_err(|e| {
                    EngineError::InvalidSnapshot(format!("rows for '{owner}': {e}"))
                })?;
                entries.extend(rows.into_iter().map(|row| {
                    if row.owner_context().is_empty() {
                        row.with_owner(owner.clone())
                    } else {
                        row
                    }
                }));
            }
            entries
        }
    };

    if let Some(index) = entries
        .iter()
        .position(|e| e.teacher_id().trim().is_empty())
    {
        return Err(EngineError::MissingTeacher { index });
    }

    tracing::debug!(entries = entries.len(), "loaded schedule snapshot");
    Ok(entries)
}
