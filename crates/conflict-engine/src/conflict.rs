//! Detect a teacher being booked into two periods at once.
//!
//! A candidate entry is compared against a snapshot of existing entries.
//! Only entries for the same teacher are considered, and entries owned by
//! the excluded context (usually the class being edited) are skipped so a
//! class never conflicts with its own saved schedule.
//!
//! [`find_conflict`] stops at the first collision in snapshot order.
//! [`find_all_conflicts`] reports every one.

use serde::Serialize;

use crate::entry::ScheduleEntry;
use crate::overlap::{overlap_minutes, time_specs_overlap};

/// A detected collision between a proposed entry and an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub candidate: ScheduleEntry,
    pub existing: ScheduleEntry,
    /// Shared minutes, when both time-specs parse. `None` for collisions
    /// found through the text fallback.
    pub overlap_minutes: Option<u32>,
}

impl Conflict {
    fn between(candidate: &ScheduleEntry, existing: &ScheduleEntry) -> Self {
        Self {
            candidate: candidate.clone(),
            existing: existing.clone(),
            overlap_minutes: overlap_minutes(candidate.time_spec(), existing.time_spec()),
        }
    }

    /// One-line description for showing to whoever is editing the schedule.
    ///
    /// ```
    /// use conflict_engine::{find_conflict, ScheduleEntry};
    ///
    /// let existing = vec![ScheduleEntry::new("T1", "MWF 08:30-09:30")
    ///     .with_subject("Math 7")
    ///     .with_owner("classA")];
    /// let candidate = ScheduleEntry::new("T1", "Wed 09:00-10:00").with_owner("classC");
    ///
    /// let conflict = find_conflict(&candidate, &existing, Some("classC")).unwrap();
    /// assert_eq!(
    ///     conflict.message(),
    ///     "Teacher T1 is already scheduled for Math 7 (classA) at \
    ///      \"MWF 08:30-09:30\", which overlaps \"Wed 09:00-10:00\" by 30 minutes"
    /// );
    /// ```
    pub fn message(&self) -> String {
        let subject = match self.existing.subject_label() {
            "" => "another class",
            label => label,
        };
        let owner = match self.existing.owner_context() {
            "" => String::new(),
            ctx => format!(" ({ctx})"),
        };
        let amount = match self.overlap_minutes {
            Some(1) => " by 1 minute".to_string(),
            Some(m) => format!(" by {m} minutes"),
            None => String::new(),
        };

        format!(
            "Teacher {} is already scheduled for {}{} at \"{}\", which overlaps \"{}\"{}",
            self.existing.teacher_id(),
            subject,
            owner,
            self.existing.time_spec(),
            self.candidate.time_spec(),
            amount
        )
    }
}

/// Find the first existing entry that collides with `candidate`.
///
/// Entries are skipped unless they belong to the same teacher, and entries
/// whose owner context equals `exclude_owner_context` are skipped too.
/// Pass `None` to compare against every entry, e.g. the other rows of an
/// open editor.
///
/// The snapshot is scanned in order and the first collision wins.
pub fn find_conflict(
    candidate: &ScheduleEntry,
    existing: &[ScheduleEntry],
    exclude_owner_context: Option<&str>,
) -> Option<Conflict> {
    let mut scanned = 0usize;
    let found = rivals(candidate, existing, exclude_owner_context)
        .inspect(|_| scanned += 1)
        .find(|entry| time_specs_overlap(candidate.time_spec(), entry.time_spec()))
        .map(|entry| Conflict::between(candidate, entry));

    match &found {
        Some(conflict) => tracing::debug!(
            teacher = candidate.teacher_id(),
            candidate = candidate.time_spec(),
            existing = conflict.existing.time_spec(),
            owner = conflict.existing.owner_context(),
            scanned,
            "schedule conflict"
        ),
        None => tracing::debug!(teacher = candidate.teacher_id(), scanned, "no conflict"),
    }

    found
}

/// Every existing entry that collides with `candidate`, in snapshot order.
///
/// Same filtering as [`find_conflict`].
pub fn find_all_conflicts(
    candidate: &ScheduleEntry,
    existing: &[ScheduleEntry],
    exclude_owner_context: Option<&str>,
) -> Vec<Conflict> {
    rivals(candidate, existing, exclude_owner_context)
        .filter(|entry| time_specs_overlap(candidate.time_spec(), entry.time_spec()))
        .map(|entry| Conflict::between(candidate, entry))
        .collect()
}

/// Entries for the candidate's teacher outside the excluded context.
fn rivals<'a>(
    candidate: &'a ScheduleEntry,
    existing: &'a [ScheduleEntry],
    exclude_owner_context: Option<&'a str>,
) -> impl Iterator<Item = &'a ScheduleEntry> {
    existing.iter().filter(move |entry| {
        entry.teacher_id() == candidate.teacher_id()
            && exclude_owner_context.is_none_or(|ctx| entry.owner_context() != ctx)
    })
}
