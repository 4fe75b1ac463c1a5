//! Parsing of free-form class period strings.
//!
//! A time-spec is whatever a person typed into a schedule row, e.g.
//! `"MWF 07:30-08:30"`, `"TTh 1:00-2:00"`, `"Daily 08:00-09:00"` or just
//! `"07:30 - 08:30"`. There is no fixed grammar. [`TimeSpec::parse`] pulls
//! out the first `H:MM-H:MM` (or `H:MM to H:MM`) range and reads weekday
//! tokens from the text in front of it.
//!
//! # Day tokens
//!
//! The text before the time range is searched in this order:
//!
//! 1. `daily` / `every` → Monday through Friday, ignoring anything else.
//! 2. Day names or their 3-letter prefixes (`mon`, `tue`, ..., `sun`),
//!    all of them collected.
//! 3. If no name matched, compact codes: `m`, `t`/`tu`, `w`, `th`, `f`,
//!    `s`/`sa`, `su`. Only words spelled entirely from these codes are read
//!    (`mwf`, `tuth`, `m-w-f`, `sasu`), so `room` is ignored. Within such a
//!    word each code rule applies independently: `t` not followed by `h` is
//!    Tuesday, `s` not followed by `u` is Saturday.
//!
//! No day token at all yields an empty [`DaySet`], which callers treat as
//! "any day".

use std::fmt;
use std::sync::LazyLock;

use chrono::Weekday;
use regex::{Regex, RegexSet};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

static TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]{1,2}):([0-9]{2})\s*(?:-|to)\s*([0-9]{1,2}):([0-9]{2})")
        .expect("time range pattern compiles")
});

static DAY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(mon|tue|wed|thu|fri|sat|sun)").expect("day name pattern compiles")
});

static COMPACT_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:m|tu|th|t|w|f|sa|su|s)+$").expect("compact word pattern compiles")
});

/// Compact code rules, one per entry of [`COMPACT_DAYS`].
static COMPACT_CODES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"m",
        r"t(?:[^h]|$)",
        r"w",
        r"th",
        r"f",
        r"s(?:[^u]|$)",
        r"su",
    ])
    .expect("compact code patterns compile")
});

const COMPACT_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ── DaySet ──────────────────────────────────────────────────────────────────

/// A set of weekdays, stored as a bitmask indexed by
/// `num_days_from_sunday` (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);

    /// Monday through Friday.
    pub const WEEKDAYS: DaySet = DaySet(0b0011_1110);

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_sunday();
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if both sets name at least one common day.
    pub fn intersects(self, other: DaySet) -> bool {
        self.0 & other.0 != 0
    }

    /// Days in the set, Sunday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        std::iter::successors(Some(Weekday::Sun), |d| Some(d.succ()))
            .take(7)
            .filter(move |d| self.contains(*d))
    }

    /// Day numbers in the set (0 = Sunday .. 6 = Saturday), ascending.
    pub fn numbers(self) -> Vec<u8> {
        self.iter().map(|d| d.num_days_from_sunday() as u8).collect()
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = DaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("any day");
        }
        let names: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        f.write_str(&names.join(", "))
    }
}

impl Serialize for DaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let numbers = self.numbers();
        let mut seq = serializer.serialize_seq(Some(numbers.len()))?;
        for n in numbers {
            seq.serialize_element(&n)?;
        }
        seq.end()
    }
}

// ── TimeSpec ────────────────────────────────────────────────────────────────

/// The structured reading of a time-spec string.
///
/// Recomputed on every comparison; never stored alongside an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSpec {
    /// Days the period meets on. Empty means no day token was found.
    pub days: DaySet,
    /// Start, in minutes since midnight.
    pub start: u32,
    /// End, in minutes since midnight.
    pub end: u32,
}

impl TimeSpec {
    /// Parse a free-form time-spec.
    ///
    /// Returns `None` when the text holds no time range. A missing day
    /// token is not a failure; it gives an empty day set.
    ///
    /// # Examples
    ///
    /// ```
    /// use conflict_engine::timespec::TimeSpec;
    /// use chrono::Weekday;
    ///
    /// let spec = TimeSpec::parse("MWF 07:30-08:30").unwrap();
    /// assert!(spec.days.contains(Weekday::Wed));
    /// assert_eq!((spec.start, spec.end), (450, 510));
    ///
    /// assert!(TimeSpec::parse("Room 204 TBA").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<TimeSpec> {
        let lower = text.to_lowercase();
        let caps = TIME_RANGE.captures(&lower)?;
        let whole = caps.get(0)?;

        let start = to_minutes(caps.get(1)?.as_str(), caps.get(2)?.as_str())?;
        let end = to_minutes(caps.get(3)?.as_str(), caps.get(4)?.as_str())?;
        let days = parse_days(&lower[..whole.start()]);

        Some(TimeSpec { days, start, end })
    }

    /// True if the two specs can meet on the same day. An empty day set
    /// matches every day.
    pub fn shares_day(&self, other: &TimeSpec) -> bool {
        self.days.is_empty() || other.days.is_empty() || self.days.intersects(other.days)
    }

    /// Half-open interval overlap on the clock, ignoring days. Touching
    /// boundaries do not overlap.
    pub fn times_overlap(&self, other: &TimeSpec) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Day overlap and time overlap together.
    pub fn overlaps(&self, other: &TimeSpec) -> bool {
        self.shares_day(other) && self.times_overlap(other)
    }

    /// Length of the shared window in minutes, or `None` if the specs do
    /// not overlap.
    pub fn overlap_minutes(&self, other: &TimeSpec) -> Option<u32> {
        if !self.overlaps(other) {
            return None;
        }
        // Reversed ranges ("10:00-09:00") can still satisfy the overlap test.
        Some(self.end.min(other.end).saturating_sub(self.start.max(other.start)))
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}-{:02}:{:02}",
            self.days,
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// Lowercase and trim. Two specs with equal normalized text always
/// conflict.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn to_minutes(hours: &str, minutes: &str) -> Option<u32> {
    let h: u32 = hours.parse().ok()?;
    let m: u32 = minutes.parse().ok()?;
    Some(h * 60 + m)
}

/// Read weekday tokens from the lowercased text in front of a time range.
fn parse_days(region: &str) -> DaySet {
    if region.contains("daily") || region.contains("every") {
        return DaySet::WEEKDAYS;
    }

    let named: DaySet = DAY_NAME
        .captures_iter(region)
        .filter_map(|c| c.get(1).and_then(|m| day_from_prefix(m.as_str())))
        .collect();
    if !named.is_empty() {
        return named;
    }

    region
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| COMPACT_WORD.is_match(word))
        .flat_map(|word| COMPACT_CODES.matches(word).into_iter())
        .map(|rule| COMPACT_DAYS[rule])
        .collect()
}

fn day_from_prefix(prefix: &str) -> Option<Weekday> {
    match prefix {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
