//! Typed wrappers for the individual columns of a box event.
//!
//! Every wrapper keeps the raw text (or raw scalar) it was built from. Filters and
//! distributions are defined on that raw form, while the parsed value is available to
//! anything that wants calendar or enum semantics.

use crate::scalar::Scalar;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The trading session date of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDate {
    pub raw: String,
    pub parsed: Option<NaiveDate>,
}

impl SessionDate {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse_date(&raw);
        Self { raw, parsed }
    }

    /// Calendar weekday, `0` = Sunday through `6` = Saturday.
    pub fn weekday(&self) -> Option<u32> {
        self.parsed.map(|d| d.weekday().num_days_from_sunday())
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    // Date-time forms ("2023-07-31T15:30:00", "2023-07-31 15:30:00+02:00").
    let head = trimmed.get(..10)?;
    match trimmed[10..].chars().next() {
        Some('T') | Some(' ') => NaiveDate::parse_from_str(head, "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// A wall-clock time of day (`HH:MM:SS` or `HH:MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub raw: String,
    pub parsed: Option<NaiveTime>,
}

impl TimeOfDay {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw.trim(), "%H:%M"))
            .ok();
        Self { raw, parsed }
    }

    /// Case-sensitive substring containment on the raw text.
    pub fn contains(&self, needle: &str) -> bool {
        self.raw.contains(needle)
    }

    /// The `HH:MM` bucket this time falls into: the first five characters of the raw
    /// text. Empty text has no bucket.
    pub fn minute_bucket(&self) -> Option<String> {
        prefix_bucket(&self.raw)
    }
}

/// First five characters of `raw`, or `None` when `raw` is empty.
pub fn prefix_bucket(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    Some(raw.chars().take(5).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    None,
    Unrecognized,
}

impl Direction {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "up" => Direction::Up,
            "down" => Direction::Down,
            "none" => Direction::None,
            _ => Direction::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::None => "none",
            Direction::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A breakout (or inverse breakout) direction as recorded by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakout {
    pub raw: String,
    pub direction: Direction,
}

impl Breakout {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let direction = Direction::parse(&raw);
        Self { raw, direction }
    }

    /// Case-insensitive equality between the recorded text and `other`.
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.raw.to_lowercase() == other.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriState {
    True,
    False,
    Unknown,
}

/// A confirmation flag. The raw scalar is kept because the filter compares its text
/// form, while tallies only recognise `true`/`false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Confirmation(pub Scalar);

impl Confirmation {
    /// Lower-cased text form of the raw value.
    pub fn normalized_text(&self) -> Option<String> {
        self.0.to_text().map(|t| t.to_lowercase())
    }

    pub fn tri_state(&self) -> TriState {
        match self.normalized_text().as_deref() {
            Some("true") => TriState::True,
            Some("false") => TriState::False,
            _ => TriState::Unknown,
        }
    }
}

/// Which raw encodings of a hit flag count as "hit".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitEncoding {
    /// The number `1`, the text `"1"` or the text `"True"`.
    Lenient,
    /// Only the text `"True"`.
    TextOnly,
}

/// A target-hit flag as stored upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HitFlag(pub Scalar);

impl HitFlag {
    pub fn is_hit(&self, encoding: HitEncoding) -> bool {
        match (&self.0, encoding) {
            (Scalar::Text(t), _) if t == "True" => true,
            (Scalar::Number(n), HitEncoding::Lenient) => *n == 1.0,
            (Scalar::Text(t), HitEncoding::Lenient) => t == "1",
            _ => false,
        }
    }
}

/// The four profit targets tracked per box, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetLevel {
    Half,
    Fib068,
    Full,
    Double,
}

impl TargetLevel {
    pub const ALL: [TargetLevel; 4] = [
        TargetLevel::Half,
        TargetLevel::Fib068,
        TargetLevel::Full,
        TargetLevel::Double,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TargetLevel::Half => "0.5",
            TargetLevel::Fib068 => "0.68",
            TargetLevel::Full => "1.0",
            TargetLevel::Double => "2.0",
        }
    }

    /// Chart label, e.g. `Target 0.68`.
    pub fn label(&self) -> String {
        format!("Target {}", self.key())
    }

    /// Column suffix used by the extractor (`target_05_hit`, `inv_target_05_hit`, ...).
    pub fn column_code(&self) -> &'static str {
        match self {
            TargetLevel::Half => "05",
            TargetLevel::Fib068 => "068",
            TargetLevel::Full => "100",
            TargetLevel::Double => "200",
        }
    }
}

/// Hit flags for all four targets of one side (regular or inverse) of a box.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TargetHits {
    pub half: Option<HitFlag>,
    pub fib_068: Option<HitFlag>,
    pub full: Option<HitFlag>,
    pub double: Option<HitFlag>,
}

impl TargetHits {
    pub fn get(&self, level: TargetLevel) -> Option<&HitFlag> {
        match level {
            TargetLevel::Half => self.half.as_ref(),
            TargetLevel::Fib068 => self.fib_068.as_ref(),
            TargetLevel::Full => self.full.as_ref(),
            TargetLevel::Double => self.double.as_ref(),
        }
    }

    pub fn set(&mut self, level: TargetLevel, flag: Option<HitFlag>) {
        match level {
            TargetLevel::Half => self.half = flag,
            TargetLevel::Fib068 => self.fib_068 = flag,
            TargetLevel::Full => self.full = flag,
            TargetLevel::Double => self.double = flag,
        }
    }

    pub fn is_hit(&self, level: TargetLevel, encoding: HitEncoding) -> bool {
        self.get(level).is_some_and(|f| f.is_hit(encoding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_counts_from_sunday() {
        assert_eq!(SessionDate::new("2023-07-31").weekday(), Some(1));
        assert_eq!(SessionDate::new("2023-08-06").weekday(), Some(0));
        assert_eq!(SessionDate::new("2023-08-05T15:30:00").weekday(), Some(6));
        assert_eq!(SessionDate::new("31/07/2023").weekday(), None);
        assert_eq!(SessionDate::new("").weekday(), None);
    }

    #[test]
    fn time_buckets_use_the_first_five_characters() {
        let t = TimeOfDay::new("09:15:23");
        assert_eq!(t.minute_bucket().as_deref(), Some("09:15"));
        assert!(t.parsed.is_some());
        assert_eq!(TimeOfDay::new("9:5").minute_bucket().as_deref(), Some("9:5"));
        assert_eq!(TimeOfDay::new("").minute_bucket(), None);
    }

    #[test]
    fn hit_flag_encodings() {
        let lenient = HitEncoding::Lenient;
        assert!(HitFlag(Scalar::Number(1.0)).is_hit(lenient));
        assert!(HitFlag(Scalar::Text("1".into())).is_hit(lenient));
        assert!(HitFlag(Scalar::Text("True".into())).is_hit(lenient));
        assert!(!HitFlag(Scalar::Text("true".into())).is_hit(lenient));
        assert!(!HitFlag(Scalar::Bool(true)).is_hit(lenient));
        assert!(!HitFlag(Scalar::Number(0.0)).is_hit(lenient));

        let strict = HitEncoding::TextOnly;
        assert!(HitFlag(Scalar::Text("True".into())).is_hit(strict));
        assert!(!HitFlag(Scalar::Text("1".into())).is_hit(strict));
        assert!(!HitFlag(Scalar::Number(1.0)).is_hit(strict));
    }

    #[test]
    fn confirmation_tri_state() {
        assert_eq!(Confirmation(Scalar::Text("True".into())).tri_state(), TriState::True);
        assert_eq!(Confirmation(Scalar::Bool(false)).tri_state(), TriState::False);
        assert_eq!(Confirmation(Scalar::Text("maybe".into())).tri_state(), TriState::Unknown);
        assert_eq!(Confirmation(Scalar::Number(1.0)).tri_state(), TriState::Unknown);
    }
}
