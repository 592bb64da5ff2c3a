//! CSV export.
//!
//! Fields are joined verbatim: commas, quotes and newlines inside free text
//! are not escaped, so such rows will not re-parse cleanly.

use crate::model::date::IsoDate;
use crate::model::day::{DailyRecord, TaskEntry};
use crate::model::store::DayStore;

/// Column names, in output order.
pub const CSV_HEADER: [&str; 14] = [
    "date",
    "mood",
    "must1",
    "must1_done",
    "must2",
    "must2_done",
    "must3",
    "must3_done",
    "nice",
    "nice_done",
    "evening_win",
    "kid_time",
    "boundary_kept",
    "notes",
];

/// Header row plus one row per stored day, oldest first, `\n`-separated.
pub fn to_csv(store: &DayStore) -> String {
    std::iter::once(CSV_HEADER.join(","))
        .chain(
            store
                .iter()
                .map(|(date, record)| record_row(*date, record).join(",")),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

fn record_row(date: IsoDate, record: &DailyRecord) -> Vec<String> {
    let mut row = Vec::with_capacity(CSV_HEADER.len());
    row.push(date.to_string());
    row.push(record.mood.to_string());
    for task in &record.must_dos {
        push_task(&mut row, task);
    }
    push_task(&mut row, &record.nice);
    row.push(record.evening_win.clone());
    row.push(flag(record.kid_time));
    row.push(flag(record.boundary_kept));
    row.push(record.notes.clone());
    row
}

fn push_task(row: &mut Vec<String>, task: &TaskEntry) {
    row.push(task.text.clone());
    row.push(flag(task.done));
}

fn flag(value: bool) -> String {
    let digit = if value { "1" } else { "0" };
    digit.to_string()
}
