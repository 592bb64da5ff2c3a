//! Daily check-in record model.
//!
//! # Responsibility
//! - Define the shape and defaults of one day's entry.
//! - Provide field-level merge (`DayPatch`) and per-task edits.
//!
//! # Invariants
//! - `mood` is always within 1..=10.
//! - A record always carries exactly `MUST_DO_COUNT` must-do entries.
//! - `date` equals the store key the record is filed under.

use crate::model::date::IsoDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of must-do tasks tracked per day.
pub const MUST_DO_COUNT: usize = 3;
pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 10;
pub const MOOD_DEFAULT: u8 = 5;

/// Validation error for record field inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Mood value outside 1..=10.
    MoodOutOfRange(i64),
    /// Must-do position outside 1..=3 (1-based as shown to users).
    MustDoOutOfRange(usize),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MoodOutOfRange(value) => write!(
                f,
                "mood {value} is out of range; expected {MOOD_MIN}..={MOOD_MAX}"
            ),
            Self::MustDoOutOfRange(position) => write!(
                f,
                "must-do {position} does not exist; expected 1..={MUST_DO_COUNT}"
            ),
        }
    }
}

impl Error for RecordValidationError {}

/// Self-reported mood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Mood(u8);

impl Mood {
    /// Creates a mood score, rejecting values outside 1..=10.
    pub fn new(value: i64) -> Result<Self, RecordValidationError> {
        if (i64::from(MOOD_MIN)..=i64::from(MOOD_MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(RecordValidationError::MoodOutOfRange(value))
        }
    }

    /// Creates a mood score, forcing out-of-range values to the nearest bound.
    ///
    /// Used when decoding persisted data where rejecting the whole store would
    /// lose unrelated days.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(MOOD_MIN), i64::from(MOOD_MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self(MOOD_DEFAULT)
    }
}

impl TryFrom<i64> for Mood {
    type Error = RecordValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mood> for u8 {
    fn from(value: Mood) -> Self {
        value.0
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One checkable task line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub text: String,
    pub done: bool,
}

impl TaskEntry {
    pub fn new(text: impl Into<String>, done: bool) -> Self {
        Self {
            text: text.into(),
            done,
        }
    }
}

/// Zero-based must-do index, always `< MUST_DO_COUNT`.
///
/// Only obtainable through `TaskSlot::must_do`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MustDoIndex(usize);

impl MustDoIndex {
    pub fn index(self) -> usize {
        self.0
    }

    /// 1-based position as shown to users.
    pub fn position(self) -> usize {
        self.0 + 1
    }
}

/// Addresses one task line inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSlot {
    MustDo(MustDoIndex),
    Nice,
}

impl TaskSlot {
    /// Builds a must-do slot from a 1-based position.
    pub fn must_do(position: usize) -> Result<Self, RecordValidationError> {
        if (1..=MUST_DO_COUNT).contains(&position) {
            Ok(Self::MustDo(MustDoIndex(position - 1)))
        } else {
            Err(RecordValidationError::MustDoOutOfRange(position))
        }
    }
}

/// Full check-in for one calendar day.
///
/// Serialized with camelCase keys to keep the persisted layout stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: IsoDate,
    pub mood: Mood,
    pub must_dos: [TaskEntry; MUST_DO_COUNT],
    pub nice: TaskEntry,
    pub evening_win: String,
    pub kid_time: bool,
    pub boundary_kept: bool,
    pub boundary_note: String,
    pub notes: String,
}

impl DailyRecord {
    /// Creates the "not yet started" record for `date`.
    ///
    /// # Invariants
    /// - Mood starts at 5, every text field empty, every flag `false`.
    /// - Deterministic for a given `date`.
    pub fn new(date: IsoDate) -> Self {
        Self {
            date,
            mood: Mood::default(),
            must_dos: Default::default(),
            nice: TaskEntry::default(),
            evening_win: String::new(),
            kid_time: false,
            boundary_kept: false,
            boundary_note: String::new(),
            notes: String::new(),
        }
    }

    /// Returns a copy with every field present in `patch` replaced.
    pub fn merged(&self, patch: &DayPatch) -> Self {
        let mut next = self.clone();
        if let Some(mood) = patch.mood {
            next.mood = mood;
        }
        if let Some(must_dos) = &patch.must_dos {
            next.must_dos = must_dos.clone();
        }
        if let Some(nice) = &patch.nice {
            next.nice = nice.clone();
        }
        if let Some(evening_win) = &patch.evening_win {
            next.evening_win = evening_win.clone();
        }
        if let Some(kid_time) = patch.kid_time {
            next.kid_time = kid_time;
        }
        if let Some(boundary_kept) = patch.boundary_kept {
            next.boundary_kept = boundary_kept;
        }
        if let Some(boundary_note) = &patch.boundary_note {
            next.boundary_note = boundary_note.clone();
        }
        if let Some(notes) = &patch.notes {
            next.notes = notes.clone();
        }
        next
    }

    /// Reads one task line.
    pub fn task(&self, slot: TaskSlot) -> &TaskEntry {
        match slot {
            TaskSlot::MustDo(index) => &self.must_dos[index.0],
            TaskSlot::Nice => &self.nice,
        }
    }

    /// Builds the patch that replaces one task line with `entry`.
    ///
    /// Must-dos are patched as a whole list, matching the shallow merge
    /// semantics of `merged`.
    pub fn task_patch(&self, slot: TaskSlot, entry: TaskEntry) -> DayPatch {
        match slot {
            TaskSlot::MustDo(index) => {
                let mut must_dos = self.must_dos.clone();
                must_dos[index.0] = entry;
                DayPatch {
                    must_dos: Some(must_dos),
                    ..DayPatch::default()
                }
            }
            TaskSlot::Nice => DayPatch {
                nice: Some(entry),
                ..DayPatch::default()
            },
        }
    }
}

/// Partial update for a record; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPatch {
    pub mood: Option<Mood>,
    pub must_dos: Option<[TaskEntry; MUST_DO_COUNT]>,
    pub nice: Option<TaskEntry>,
    pub evening_win: Option<String>,
    pub kid_time: Option<bool>,
    pub boundary_kept: Option<bool>,
    pub boundary_note: Option<String>,
    pub notes: Option<String>,
}

impl DayPatch {
    /// Whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
