//! Calendar date key used by the day store.
//!
//! # Responsibility
//! - Parse and render the canonical `YYYY-MM-DD` key format.
//! - Provide day arithmetic for navigation and week windows.
//!
//! # Invariants
//! - Only dates with a 4-digit year (0001-9999) are representable, so
//!   `Ord` on `IsoDate` matches lexicographic order of the string form.
//! - `IsoDate::parse(d.to_string()) == Ok(d)` for every `IsoDate`.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Error for malformed or unrepresentable calendar dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input is not exactly `YYYY-MM-DD` or names no real day.
    Malformed(String),
    /// Date arithmetic left the 0001-9999 year range.
    OutOfRange,
}

impl Display for DateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => {
                write!(f, "invalid ISO date `{value}`; expected YYYY-MM-DD")
            }
            Self::OutOfRange => write!(f, "date is outside the supported 0001-9999 range"),
        }
    }
}

impl Error for DateError {}

/// A calendar day in `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    /// Parses a strict `YYYY-MM-DD` string.
    ///
    /// # Errors
    /// - Returns `DateError::Malformed` for anything but ten characters of
    ///   zero-padded digits naming a real calendar day.
    pub fn parse(value: &str) -> Result<Self, DateError> {
        let malformed = || DateError::Malformed(value.to_string());
        let bytes = value.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes.iter().enumerate().all(|(idx, byte)| match idx {
                4 | 7 => *byte == b'-',
                _ => byte.is_ascii_digit(),
            });
        if !shape_ok {
            return Err(malformed());
        }

        let date = NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|_| malformed())?;
        Self::from_naive(date).ok_or_else(malformed)
    }

    /// Wraps a chrono date when its year is representable.
    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        (MIN_YEAR..=MAX_YEAR)
            .contains(&date.year())
            .then_some(Self(date))
    }

    /// Current calendar day in UTC.
    pub fn today() -> Self {
        let date = Utc::now().date_naive();
        // Clock years past 9999 clamp to the last representable day.
        Self::from_naive(date).unwrap_or_else(|| {
            Self(NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap_or(date))
        })
    }

    /// Returns this date moved by `days`, or `None` when out of range.
    pub fn shifted(self, days: i64) -> Option<Self> {
        let delta = Duration::try_days(days)?;
        self.0.checked_add_signed(delta).and_then(Self::from_naive)
    }

    /// Underlying chrono date.
    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl Display for IsoDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl FromStr for IsoDate {
    type Err = DateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for IsoDate {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IsoDate> for String {
    fn from(value: IsoDate) -> Self {
        value.to_string()
    }
}
