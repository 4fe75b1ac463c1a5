//! Schedule entries: one teacher assigned to one class period.

use serde::{Deserialize, Serialize};

use crate::timespec::TimeSpec;

/// A teacher's assignment to a period, as entered for one class.
///
/// Entries are values. The `with_*` methods return a new entry rather than
/// changing an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    teacher_id: String,
    time_spec: String,
    #[serde(default)]
    subject_label: String,
    #[serde(default)]
    owner_context: String,
}

impl ScheduleEntry {
    pub fn new(teacher_id: impl Into<String>, time_spec: impl Into<String>) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            time_spec: time_spec.into(),
            subject_label: String::new(),
            owner_context: String::new(),
        }
    }

    pub fn with_subject(mut self, subject_label: impl Into<String>) -> Self {
        self.subject_label = subject_label.into();
        self
    }

    pub fn with_owner(mut self, owner_context: impl Into<String>) -> Self {
        self.owner_context = owner_context.into();
        self
    }

    pub fn with_time_spec(mut self, time_spec: impl Into<String>) -> Self {
        self.time_spec = time_spec.into();
        self
    }

    pub fn teacher_id(&self) -> &str {
        &self.teacher_id
    }

    pub fn time_spec(&self) -> &str {
        &self.time_spec
    }

    /// Display label only; never compared.
    pub fn subject_label(&self) -> &str {
        &self.subject_label
    }

    /// The class or session this entry belongs to.
    pub fn owner_context(&self) -> &str {
        &self.owner_context
    }

    /// Structured reading of the time-spec, if it holds a time range.
    pub fn parsed(&self) -> Option<TimeSpec> {
        TimeSpec::parse(&self.time_spec)
    }
}
