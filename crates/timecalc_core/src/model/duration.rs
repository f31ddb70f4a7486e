//! Duration value model.
//!
//! # Responsibility
//! - Define the immutable days/hours/minutes span used by every feature.
//! - Provide addition, normalization, parsing and display formatting.
//!
//! # Invariants
//! - All fields are non-negative; `new` rejects negative input.
//! - `new` does not normalize. `from_minutes`, `normalize` and `add` always
//!   return the canonical form (`hours < 24`, `minutes < 60`).
//! - Arithmetic goes through the total-minutes encoding and saturates at
//!   `u64::MAX` minutes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const MINUTES_PER_HOUR: u64 = 60;
pub const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

static DURATION_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)([dhm])").expect("valid duration token regex"));

/// Duration construction and parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// A component or total was negative.
    InvalidArgument { field: &'static str, value: i64 },
    /// Text contained no `(digits)(unit)` token, or a token was too large.
    ParseFailure(String),
}

impl Display for DurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
            Self::ParseFailure(details) => write!(f, "invalid duration format: {details}"),
        }
    }
}

impl Error for DurationError {}

/// Unit letter accepted by the parser and the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Day,
    Hour,
    Minute,
}

impl TimeUnit {
    /// Lowercase letter used in duration text.
    pub fn letter(self) -> char {
        match self {
            Self::Day => 'd',
            Self::Hour => 'h',
            Self::Minute => 'm',
        }
    }

    /// Number of minutes one unit stands for.
    pub fn minute_weight(self) -> u64 {
        match self {
            Self::Day => MINUTES_PER_DAY,
            Self::Hour => MINUTES_PER_HOUR,
            Self::Minute => 1,
        }
    }

    /// Case-sensitive: only `d`, `h`, `m` are units.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'd' => Some(Self::Day),
            'h' => Some(Self::Hour),
            'm' => Some(Self::Minute),
            _ => None,
        }
    }
}

/// Non-negative span of days, hours and minutes.
///
/// Equality is structural: `Duration::new(0, 25, 0)` and
/// `Duration::new(1, 1, 0)` are different values with the same
/// [`Duration::total_minutes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Duration {
    days: u64,
    hours: u64,
    minutes: u64,
}

impl Duration {
    pub const ZERO: Duration = Duration {
        days: 0,
        hours: 0,
        minutes: 0,
    };

    /// Creates a duration from raw components without normalizing them.
    ///
    /// # Errors
    /// - `InvalidArgument` when any component is negative.
    pub fn new(days: i64, hours: i64, minutes: i64) -> Result<Self, DurationError> {
        Ok(Self {
            days: non_negative("days", days)?,
            hours: non_negative("hours", hours)?,
            minutes: non_negative("minutes", minutes)?,
        })
    }

    /// Creates a normalized duration from a total minute count.
    ///
    /// # Errors
    /// - `InvalidArgument` when `total` is negative.
    pub fn from_minutes(total: i64) -> Result<Self, DurationError> {
        non_negative("total minutes", total).map(Self::from_total)
    }

    fn from_total(total: u64) -> Self {
        Self {
            days: total / MINUTES_PER_DAY,
            hours: (total % MINUTES_PER_DAY) / MINUTES_PER_HOUR,
            minutes: total % MINUTES_PER_HOUR,
        }
    }

    pub fn days(&self) -> u64 {
        self.days
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    /// Canonical integer encoding: `days*1440 + hours*60 + minutes`.
    pub fn total_minutes(&self) -> u64 {
        self.days
            .saturating_mul(MINUTES_PER_DAY)
            .saturating_add(self.hours.saturating_mul(MINUTES_PER_HOUR))
            .saturating_add(self.minutes)
    }

    /// Sum of two durations, always normalized.
    pub fn add(&self, other: &Duration) -> Duration {
        Self::from_total(self.total_minutes().saturating_add(other.total_minutes()))
    }

    pub fn normalize(&self) -> Duration {
        Self::from_total(self.total_minutes())
    }

    pub fn is_zero(&self) -> bool {
        self.total_minutes() == 0
    }

    /// Parses text such as `"2d 3h 45m"` or `"3h30m"`.
    ///
    /// Every non-overlapping `(digits)(d|h|m)` token is summed; any other
    /// character is skipped.
    ///
    /// # Errors
    /// - `ParseFailure` when no token is found.
    /// - `ParseFailure` when a token's number does not fit the minute range.
    pub fn parse(text: &str) -> Result<Self, DurationError> {
        let mut total: u64 = 0;
        let mut matched = false;

        for caps in DURATION_TOKEN_RE.captures_iter(text) {
            matched = true;
            let digits = &caps[1];
            let value = digits
                .parse::<u64>()
                .map_err(|_| DurationError::ParseFailure(format!("number too large: {digits}")))?;
            let unit = caps[2]
                .chars()
                .next()
                .and_then(TimeUnit::from_letter)
                .ok_or_else(|| DurationError::ParseFailure("unknown unit".to_string()))?;
            total = value
                .checked_mul(unit.minute_weight())
                .and_then(|minutes| total.checked_add(minutes))
                .ok_or_else(|| DurationError::ParseFailure("duration too large".to_string()))?;
        }

        if !matched {
            return Err(DurationError::ParseFailure(
                "expected at least one <number><d|h|m> token".to_string(),
            ));
        }
        Ok(Self::from_total(total))
    }

    /// Converts detail-form text fields into a duration.
    ///
    /// An unparseable field counts as 0. A negative field makes the whole
    /// duration fall back to [`Duration::ZERO`]. The result is not
    /// normalized.
    pub fn from_form_fields(days: &str, hours: &str, minutes: &str) -> Duration {
        let field = |raw: &str| raw.trim().parse::<i64>().unwrap_or(0);
        Self::new(field(days), field(hours), field(minutes)).unwrap_or(Self::ZERO)
    }

    /// Human-readable form: `"2d 3h 45m"`, zero parts omitted, `"0m"` if empty.
    pub fn format(&self) -> String {
        let parts = [
            (self.days, TimeUnit::Day),
            (self.hours, TimeUnit::Hour),
            (self.minutes, TimeUnit::Minute),
        ];
        let rendered = parts
            .iter()
            .filter(|(value, _)| *value > 0)
            .map(|(value, unit)| format!("{value}{}", unit.letter()))
            .collect::<Vec<_>>();

        if rendered.is_empty() {
            "0m".to_string()
        } else {
            rendered.join(" ")
        }
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for Duration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, DurationError> {
    u64::try_from(value).map_err(|_| DurationError::InvalidArgument { field, value })
}

#[cfg(test)]
mod tests {
    use super::{Duration, DurationError, TimeUnit};

    fn d(days: i64, hours: i64, minutes: i64) -> Duration {
        Duration::new(days, hours, minutes).expect("non-negative components")
    }

    #[test]
    fn new_rejects_negative_components() {
        let err = Duration::new(0, -1, 0).unwrap_err();
        assert_eq!(
            err,
            DurationError::InvalidArgument {
                field: "hours",
                value: -1
            }
        );
    }

    #[test]
    fn new_keeps_unnormalized_components() {
        let raw = d(0, 25, 0);
        assert_eq!(raw.hours(), 25);
        assert_eq!(raw.normalize(), d(1, 1, 0));
    }

    #[test]
    fn from_minutes_splits_into_units() {
        assert_eq!(Duration::from_minutes(25 * 60).unwrap(), d(1, 1, 0));
        assert_eq!(Duration::from_minutes(1441).unwrap(), d(1, 0, 1));
        assert!(Duration::from_minutes(-1).is_err());
    }

    #[test]
    fn format_suppresses_zero_parts() {
        assert_eq!(d(0, 0, 0).format(), "0m");
        assert_eq!(d(1, 0, 0).format(), "1d");
        assert_eq!(d(0, 1, 30).format(), "1h 30m");
        assert_eq!(d(2, 0, 5).to_string(), "2d 5m");
    }

    #[test]
    fn parse_sums_tokens_and_skips_noise() {
        let parsed = Duration::parse("2d 3h 45m").unwrap();
        assert_eq!(parsed.total_minutes(), 2 * 1440 + 3 * 60 + 45);

        let packed: Duration = "a1hx30m!".parse().unwrap();
        assert_eq!(packed, d(0, 1, 30));

        assert_eq!(Duration::parse("90m").unwrap(), d(0, 1, 30));
    }

    #[test]
    fn parse_skips_non_ascii_digits_as_noise() {
        let parsed = Duration::parse("1h \u{0663}m").unwrap();
        assert_eq!(parsed.total_minutes(), 60);

        assert!(matches!(
            Duration::parse("\u{0663}h"),
            Err(DurationError::ParseFailure(_))
        ));
    }

    #[test]
    fn parse_requires_at_least_one_token() {
        for input in ["", "abc", "5", "5H", "d3"] {
            assert!(
                matches!(Duration::parse(input), Err(DurationError::ParseFailure(_))),
                "expected parse failure for {input:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_oversized_numbers() {
        let err = Duration::parse("99999999999999999999999m").unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn form_fields_fall_back_to_zero() {
        assert_eq!(Duration::from_form_fields("1", "x", " 5 "), d(1, 0, 5));
        assert!(Duration::from_form_fields("0", "-2", "10").is_zero());
        assert_eq!(Duration::from_form_fields("", "30", "0").hours(), 30);
    }

    #[test]
    fn unit_letters_are_case_sensitive() {
        assert_eq!(TimeUnit::from_letter('h'), Some(TimeUnit::Hour));
        assert_eq!(TimeUnit::from_letter('H'), None);
        assert_eq!(TimeUnit::Day.minute_weight(), 1440);
    }

    #[test]
    fn add_saturates_instead_of_overflowing() {
        let huge = Duration::from_minutes(i64::MAX).unwrap();
        let sum = huge.add(&huge).add(&huge);
        assert_eq!(sum.total_minutes(), u64::MAX);
    }
}
