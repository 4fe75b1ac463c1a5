//! Decide whether two time-spec strings describe colliding periods.
//!
//! The comparison never fails. Text without a recognizable time range
//! falls back to substring containment, so `"Room 204 TBA"` still collides
//! with `"Room 204 TBA Morning"`. Every step is symmetric in its two
//! arguments.

use crate::timespec::{normalize, TimeSpec};

/// Whether two free-form time-specs overlap.
///
/// 1. Either spec blank → `false`.
/// 2. Equal after trimming and lowercasing → `true`, even if unparsable.
/// 3. Either spec has no time range → `true` iff one normalized string
///    contains the other.
/// 4. Otherwise the day sets must intersect (an empty day set matches any
///    day) and the clock ranges must overlap as half-open intervals.
///
/// # Examples
///
/// ```
/// use conflict_engine::time_specs_overlap;
///
/// assert!(time_specs_overlap("Mon 07:30-08:30", "Mon 08:00-09:00"));
/// assert!(!time_specs_overlap("Mon 07:30-08:30", "Mon 08:30-09:30"));
/// assert!(!time_specs_overlap("Mon 07:30-08:30", "Tue 07:30-08:30"));
/// ```
pub fn time_specs_overlap(spec_a: &str, spec_b: &str) -> bool {
    let a = normalize(spec_a);
    let b = normalize(spec_b);

    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }

    match (TimeSpec::parse(&a), TimeSpec::parse(&b)) {
        (Some(parsed_a), Some(parsed_b)) => parsed_a.overlaps(&parsed_b),
        _ => {
            tracing::trace!(spec_a = %a, spec_b = %b, "no time range found, comparing text");
            a.contains(&b) || b.contains(&a)
        }
    }
}

/// Minutes of shared time between two specs.
///
/// `Some` only when both specs parse and overlap on day and clock. Specs
/// that collide through the exact-text or substring fallback have no
/// measurable overlap and give `None`.
pub fn overlap_minutes(spec_a: &str, spec_b: &str) -> Option<u32> {
    let a = TimeSpec::parse(spec_a)?;
    let b = TimeSpec::parse(spec_b)?;
    a.overlap_minutes(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── basic contract ──────────────────────────────────────────────────

    #[test]
    fn test_empty_never_overlaps() {
        assert!(!time_specs_overlap("", "Mon 07:30-08:30"));
        assert!(!time_specs_overlap("Mon 07:30-08:30", ""));
        assert!(!time_specs_overlap("", ""));
    }

    #[test]
    fn test_blank_counts_as_empty() {
        assert!(!time_specs_overlap("   ", "Mon 07:30-08:30"));
        assert!(!time_specs_overlap("  ", " "));
    }

    #[test]
    fn test_exact_duplicate_ignores_case_and_padding() {
        assert!(time_specs_overlap("MWF 07:30-08:30", "mwf 07:30-08:30"));
        assert!(time_specs_overlap("  TBA  ", "tba"));
    }

    #[test]
    fn test_same_day_overlapping_times() {
        assert!(time_specs_overlap("Mon 07:30-08:30", "Mon 08:00-09:00"));
    }

    #[test]
    fn test_same_day_touching_times() {
        assert!(!time_specs_overlap("Mon 07:30-08:30", "Mon 08:30-09:30"));
    }

    #[test]
    fn test_different_days_same_times() {
        assert!(!time_specs_overlap("Mon 07:30-08:30", "Tue 07:30-08:30"));
    }

    #[test]
    fn test_missing_days_are_any_day() {
        assert!(time_specs_overlap("07:30-08:30", "Sat 08:00-09:00"));
        assert!(!time_specs_overlap("07:30-08:00", "Sat 08:00-09:00"));
    }

    #[test]
    fn test_daily_keyword() {
        assert!(time_specs_overlap("Daily 07:00-08:00", "Wed 07:30-07:45"));
        assert!(!time_specs_overlap("Daily 07:00-08:00", "Sat 07:30-07:45"));
    }

    #[test]
    fn test_compact_codes_against_names() {
        assert!(time_specs_overlap("TTh 1:00-2:00", "Thursday 1:30-2:30"));
        assert!(!time_specs_overlap("MWF 1:00-2:00", "Thursday 1:30-2:30"));
    }

    #[test]
    fn test_two_letter_codes_keep_their_days() {
        assert!(time_specs_overlap("Tu/Th 1:00-2:00", "Tue 1:30-2:30"));
        assert!(!time_specs_overlap("TuTh 1:00-2:00", "Mon 1:30-2:30"));
        assert!(time_specs_overlap("SaSu 8:00-9:00", "Sunday 8:30-9:30"));
        assert!(!time_specs_overlap("MTuWThF 8:00-9:00", "Sat 8:30-9:30"));
    }

    // ── fallback ────────────────────────────────────────────────────────

    #[test]
    fn test_unparsable_substring_fallback() {
        assert!(time_specs_overlap("Room 204 TBA", "Room 204 TBA Morning"));
        assert!(!time_specs_overlap("Room 204", "Room 305"));
    }

    #[test]
    fn test_one_side_unparsable_uses_fallback() {
        // The parsed side is ignored; only text containment counts.
        assert!(time_specs_overlap("Mon 07:30-08:30", "mon"));
        assert!(!time_specs_overlap("Mon 07:30-08:30", "TBA"));
    }

    // ── overlap_minutes ─────────────────────────────────────────────────

    #[test]
    fn test_overlap_minutes_measures_shared_window() {
        assert_eq!(overlap_minutes("Mon 07:30-08:30", "Mon 08:00-09:00"), Some(30));
        assert_eq!(overlap_minutes("Daily 07:00-08:00", "Wed 07:30-07:45"), Some(15));
    }

    #[test]
    fn test_overlap_minutes_none_without_overlap() {
        assert_eq!(overlap_minutes("Mon 07:30-08:30", "Tue 07:30-08:30"), None);
        assert_eq!(overlap_minutes("Room 204 TBA", "Room 204 TBA"), None);
    }
}
