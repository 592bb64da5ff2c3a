//! Week window and day display helpers.
//!
//! # Invariants
//! - A week window is always 7 consecutive days, ascending, centered on the
//!   requested date.
//! - Functions here are pure; "today" is only read by `IsoDate::today`.

use crate::model::date::{DateError, IsoDate};
use crate::model::day::Mood;
use crate::model::store::DayStore;

/// Days shown on either side of the center date.
pub const WEEK_RADIUS: i64 = 3;
pub const WEEK_LEN: usize = 7;

const DONE_MARK: &str = "✓ ";
const TASK_SEPARATOR: &str = " · ";
const NO_TASKS: &str = "No tasks yet";

/// Returns `center - 3` through `center + 3`.
///
/// # Errors
/// - `DateError::OutOfRange` when the window would leave years 0001-9999.
pub fn week_around(center: IsoDate) -> Result<[IsoDate; WEEK_LEN], DateError> {
    let mut week = [center; WEEK_LEN];
    for (offset, slot) in (-WEEK_RADIUS..=WEEK_RADIUS).zip(week.iter_mut()) {
        *slot = center.shifted(offset).ok_or(DateError::OutOfRange)?;
    }
    Ok(week)
}

/// Short human label, e.g. `Sat, Jun 15`.
pub fn format_display_date(date: IsoDate) -> String {
    date.as_naive().format("%a, %b %-d").to_string()
}

/// One day of the week-at-a-glance view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDaySummary {
    pub date: IsoDate,
    /// `None` when the day was never started.
    pub mood: Option<Mood>,
    /// Non-empty must-dos joined by ` · `, done ones prefixed with `✓ `.
    pub tasks: String,
}

/// Summarizes the week around `center` from stored records only.
pub fn week_summary(store: &DayStore, center: IsoDate) -> Result<Vec<WeekDaySummary>, DateError> {
    Ok(week_around(center)?
        .into_iter()
        .map(|date| summarize_day(store, date))
        .collect())
}

fn summarize_day(store: &DayStore, date: IsoDate) -> WeekDaySummary {
    let Some(record) = store.stored(date) else {
        return WeekDaySummary {
            date,
            mood: None,
            tasks: NO_TASKS.to_string(),
        };
    };

    let tasks = record
        .must_dos
        .iter()
        .filter(|task| !task.text.is_empty())
        .map(|task| {
            if task.done {
                format!("{DONE_MARK}{}", task.text)
            } else {
                task.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(TASK_SEPARATOR);

    WeekDaySummary {
        date,
        mood: Some(record.mood),
        tasks: if tasks.is_empty() {
            NO_TASKS.to_string()
        } else {
            tasks
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{format_display_date, week_around, week_summary};
    use crate::model::date::{DateError, IsoDate};
    use crate::model::day::{DailyRecord, Mood, TaskEntry};
    use crate::model::store::DayStore;

    fn date(value: &str) -> IsoDate {
        IsoDate::parse(value).unwrap()
    }

    #[test]
    fn week_around_spans_three_days_each_side() {
        let week = week_around(date("2024-06-15")).unwrap();
        let rendered: Vec<String> = week.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "2024-06-12",
                "2024-06-13",
                "2024-06-14",
                "2024-06-15",
                "2024-06-16",
                "2024-06-17",
                "2024-06-18",
            ]
        );
    }

    #[test]
    fn week_around_crosses_leap_day_and_year_end() {
        let leap = week_around(date("2024-03-01")).unwrap();
        assert_eq!(leap[1].to_string(), "2024-02-27");
        assert_eq!(leap[2].to_string(), "2024-02-28");
        assert_eq!(leap[3].to_string(), "2024-02-29");
        assert_eq!(leap[4].to_string(), "2024-03-01");

        let new_year = week_around(date("2024-12-30")).unwrap();
        assert_eq!(new_year[6].to_string(), "2025-01-02");
    }

    #[test]
    fn week_around_is_idempotent() {
        let center = date("2024-06-15");
        assert_eq!(week_around(center).unwrap(), week_around(center).unwrap());
    }

    #[test]
    fn week_around_rejects_windows_past_year_9999() {
        assert_eq!(
            week_around(date("9999-12-30")),
            Err(DateError::OutOfRange)
        );
    }

    #[test]
    fn format_display_date_uses_short_names() {
        assert_eq!(format_display_date(date("2024-06-15")), "Sat, Jun 15");
        assert_eq!(format_display_date(date("2024-06-03")), "Mon, Jun 3");
    }

    #[test]
    fn week_summary_marks_done_tasks_and_missing_days() {
        let mut record = DailyRecord::new(date("2024-06-15"));
        record.mood = Mood::new(7).unwrap();
        record.must_dos[0] = TaskEntry::new("Ship", true);
        record.must_dos[2] = TaskEntry::new("Call mum", false);
        let blank = DailyRecord::new(date("2024-06-14"));
        let store: DayStore = [record, blank].into_iter().collect();

        let summary = week_summary(&store, date("2024-06-15")).unwrap();
        assert_eq!(summary.len(), 7);

        let today = &summary[3];
        assert_eq!(today.mood, Some(Mood::new(7).unwrap()));
        assert_eq!(today.tasks, "✓ Ship · Call mum");

        let started_without_tasks = &summary[2];
        assert_eq!(started_without_tasks.mood, Some(Mood::default()));
        assert_eq!(started_without_tasks.tasks, "No tasks yet");

        let untouched = &summary[0];
        assert_eq!(untouched.mood, None);
        assert_eq!(untouched.tasks, "No tasks yet");
    }
}
