//! Date-keyed store of daily records.
//!
//! # Responsibility
//! - Hold every started day, ordered by date.
//! - Materialize default records for days that were never edited.
//! - Decode persisted/imported JSON tolerantly.
//!
//! # Invariants
//! - Every stored record's `date` equals its key.
//! - Reads never insert: `get_day` on a missing date leaves the store as-is.
//! - Mutations return a new store value instead of editing in place.

use crate::model::date::IsoDate;
use crate::model::day::{DailyRecord, DayPatch, Mood, TaskEntry, MUST_DO_COUNT};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for JSON that cannot be read as a day store at all.
#[derive(Debug)]
pub enum StoreDecodeError {
    /// Not JSON, not an object, or a field of the wrong type.
    Json(serde_json::Error),
}

impl Display for StoreDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid day store JSON: {err}"),
        }
    }
}

impl Error for StoreDecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreDecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Mapping from calendar day to its record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DayStore {
    days: BTreeMap<IsoDate, DailyRecord>,
}

// Keys win over embedded dates so a record can never be filed under a day
// other than its own.
impl<'de> Deserialize<'de> for DayStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<IsoDate, DailyRecord>::deserialize(deserializer)?;
        let days = raw
            .into_iter()
            .map(|(date, mut record)| {
                record.date = date;
                (date, record)
            })
            .collect();
        Ok(Self { days })
    }
}

impl DayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored record, or the default record for an untouched day.
    pub fn get_day(&self, date: IsoDate) -> DailyRecord {
        self.days
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyRecord::new(date))
    }

    /// Stored record only; `None` for days never edited.
    pub fn stored(&self, date: IsoDate) -> Option<&DailyRecord> {
        self.days.get(&date)
    }

    /// Returns a new store with `patch` merged into the record at `date`.
    pub fn with_day(&self, date: IsoDate, patch: &DayPatch) -> Self {
        let record = self.get_day(date).merged(patch);
        self.with_record(record)
    }

    /// Returns a new store with `record` filed under its own date.
    pub fn with_record(&self, record: DailyRecord) -> Self {
        let mut days = self.days.clone();
        days.insert(record.date, record);
        Self { days }
    }

    /// Returns a new store where every day of `other` replaces the same day here.
    pub fn merged_with(&self, other: &DayStore) -> Self {
        let mut days = self.days.clone();
        days.extend(other.days.iter().map(|(date, record)| (*date, record.clone())));
        Self { days }
    }

    /// Iterates stored days in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (&IsoDate, &DailyRecord)> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Decodes store JSON, tolerating gaps older or hand-edited data may have.
    ///
    /// # Tolerance rules
    /// - `null` day entries are skipped.
    /// - Missing fields take their default-record values.
    /// - Must-do lists are padded or truncated to three entries.
    /// - Out-of-range moods are clamped into 1..=10.
    /// - A record's `date` is realigned to its key.
    ///
    /// # Errors
    /// - Returns `StoreDecodeError::Json` when the text is not a JSON object
    ///   keyed by ISO dates, or a field has an incompatible type.
    pub fn from_json_lenient(text: &str) -> Result<Self, StoreDecodeError> {
        let raw: BTreeMap<IsoDate, Option<LenientDay>> = serde_json::from_str(text)?;
        let days = raw
            .into_iter()
            .filter_map(|(date, day)| day.map(|day| (date, day.into_record(date))))
            .collect();
        Ok(Self { days })
    }
}

impl FromIterator<DailyRecord> for DayStore {
    fn from_iter<T: IntoIterator<Item = DailyRecord>>(iter: T) -> Self {
        Self {
            days: iter
                .into_iter()
                .map(|record| (record.date, record))
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LenientDay {
    #[serde(default)]
    mood: Option<i64>,
    #[serde(default)]
    must_dos: Option<Vec<Option<LenientTask>>>,
    #[serde(default)]
    nice: Option<LenientTask>,
    #[serde(default)]
    evening_win: Option<String>,
    #[serde(default)]
    kid_time: Option<bool>,
    #[serde(default)]
    boundary_kept: Option<bool>,
    #[serde(default)]
    boundary_note: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LenientTask {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    done: Option<bool>,
}

impl LenientTask {
    fn into_entry(self) -> TaskEntry {
        TaskEntry {
            text: self.text.unwrap_or_default(),
            done: self.done.unwrap_or(false),
        }
    }
}

impl LenientDay {
    fn into_record(self, date: IsoDate) -> DailyRecord {
        let mut record = DailyRecord::new(date);
        if let Some(mood) = self.mood {
            record.mood = Mood::clamped(mood);
        }
        if let Some(must_dos) = self.must_dos {
            for (slot, task) in record
                .must_dos
                .iter_mut()
                .zip(must_dos.into_iter().take(MUST_DO_COUNT))
            {
                *slot = task.map(LenientTask::into_entry).unwrap_or_default();
            }
        }
        if let Some(nice) = self.nice {
            record.nice = nice.into_entry();
        }
        record.evening_win = self.evening_win.unwrap_or_default();
        record.kid_time = self.kid_time.unwrap_or(false);
        record.boundary_kept = self.boundary_kept.unwrap_or(false);
        record.boundary_note = self.boundary_note.unwrap_or_default();
        record.notes = self.notes.unwrap_or_default();
        record
    }
}
