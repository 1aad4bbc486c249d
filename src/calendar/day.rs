//! Day identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// First door of the calendar
pub const FIRST_DAY: u32 = 1;
/// Last door of the calendar
pub const LAST_DAY: u32 = 24;

/// Errors produced when turning input into a [`Day`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayError {
    #[error("'{0}' is not a day number")]
    NotNumeric(String),
    #[error("day {0} is outside 1..=24")]
    OutOfRange(i64),
}

/// A calendar day identifier, always within `FIRST_DAY..=LAST_DAY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Day(u8);

impl Day {
    /// Create a day, rejecting anything outside the calendar
    pub fn new(n: i64) -> Result<Self, DayError> {
        if (i64::from(FIRST_DAY)..=i64::from(LAST_DAY)).contains(&n) {
            Ok(Self(n as u8))
        } else {
            Err(DayError::OutOfRange(n))
        }
    }

    /// Numeric value of the day
    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    /// The day before, if any
    pub fn previous(self) -> Option<Day> {
        Day::new(i64::from(self.0) - 1).ok()
    }

    /// The day after, if any
    pub fn next(self) -> Option<Day> {
        Day::new(i64::from(self.0) + 1).ok()
    }

    /// Iterate over every day of the calendar in order
    pub fn all() -> impl Iterator<Item = Day> {
        (FIRST_DAY..=LAST_DAY).map(|n| Day(n as u8))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Day {
    type Error = DayError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        Day::new(n)
    }
}

impl From<Day> for u32 {
    fn from(day: Day) -> u32 {
        day.get()
    }
}

impl FromStr for Day {
    type Err = DayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match DayParam::parse(s) {
            DayParam::Number(n) => Day::new(n),
            DayParam::Malformed(raw) => Err(DayError::NotNumeric(raw)),
        }
    }
}

/// A day as it arrives from a routed path segment.
///
/// Parsing never fails: text that is not an integer is kept as
/// `Malformed` so that it can still be compared and reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DayParam {
    Number(i64),
    Malformed(String),
}

impl DayParam {
    /// Parse a path segment. Surrounding whitespace and leading zeros are
    /// accepted; signs, decimals and exponents are not.
    pub fn parse(segment: &str) -> Self {
        let trimmed = segment.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return DayParam::Malformed(segment.to_string());
        }
        match trimmed.parse::<i64>() {
            Ok(n) => DayParam::Number(n),
            // Too many digits for i64 is out of range, not malformed
            Err(_) => DayParam::Number(i64::MAX),
        }
    }

    /// The parsed number, if the segment was numeric
    pub fn number(&self) -> Option<i64> {
        match self {
            DayParam::Number(n) => Some(*n),
            DayParam::Malformed(_) => None,
        }
    }

    /// Convert into a calendar day
    pub fn to_day(&self) -> Result<Day, DayError> {
        match self {
            DayParam::Number(n) => Day::new(*n),
            DayParam::Malformed(raw) => Err(DayError::NotNumeric(raw.clone())),
        }
    }
}

impl fmt::Display for DayParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayParam::Number(n) => write!(f, "{}", n),
            DayParam::Malformed(raw) => write!(f, "{:?}", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_range() {
        assert!(Day::new(0).is_err());
        assert_eq!(Day::new(1).unwrap().get(), 1);
        assert_eq!(Day::new(24).unwrap().get(), 24);
        assert_eq!(Day::new(25), Err(DayError::OutOfRange(25)));
    }

    #[test]
    fn test_previous_and_next() {
        let first = Day::new(1).unwrap();
        let last = Day::new(24).unwrap();
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Day::new(2).ok());
        assert_eq!(last.next(), None);
        assert_eq!(last.previous(), Day::new(23).ok());
    }

    #[test]
    fn test_all_days() {
        let days: Vec<u32> = Day::all().map(Day::get).collect();
        assert_eq!(days.len(), 24);
        assert_eq!(days.first(), Some(&1));
        assert_eq!(days.last(), Some(&24));
    }

    #[test]
    fn test_parse_segment() {
        assert_eq!(DayParam::parse("7"), DayParam::Number(7));
        assert_eq!(DayParam::parse(" 07 "), DayParam::Number(7));
        assert_eq!(DayParam::parse("-3"), DayParam::Malformed("-3".to_string()));
        assert_eq!(DayParam::parse("1e1"), DayParam::Malformed("1e1".to_string()));
        assert_eq!(DayParam::parse(""), DayParam::Malformed(String::new()));
        assert_eq!(
            DayParam::parse("99999999999999999999999"),
            DayParam::Number(i64::MAX)
        );
    }

    #[test]
    fn test_day_from_str() {
        assert_eq!("12".parse::<Day>(), Day::new(12));
        assert!(matches!("x".parse::<Day>(), Err(DayError::NotNumeric(_))));
        assert!(matches!("30".parse::<Day>(), Err(DayError::OutOfRange(30))));
    }

    #[test]
    fn test_day_serde() {
        let day = Day::new(3).unwrap();
        assert_eq!(serde_json::to_string(&day).unwrap(), "3");
        assert_eq!(serde_json::from_str::<Day>("3").unwrap(), day);
        assert!(serde_json::from_str::<Day>("42").is_err());
    }
}
