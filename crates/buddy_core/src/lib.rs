//! Core domain logic for Burnout Buddy, a personal daily wellbeing journal.
//! This crate is the single source of truth for record and store invariants.

pub mod calendar;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::{format_display_date, week_around, week_summary, WeekDaySummary};
pub use export::{export_file_name, ExportFormat};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::{DateError, IsoDate};
pub use model::day::{
    DailyRecord, DayPatch, Mood, MustDoIndex, RecordValidationError, TaskEntry, TaskSlot,
    MUST_DO_COUNT,
};
pub use model::store::{DayStore, StoreDecodeError};
pub use repo::kv_repo::{
    KvRepository, MemoryKvRepository, RepoError, RepoResult, SqliteKvRepository,
};
pub use service::journal_service::{JournalService, STORE_KEY};

/// Default record for a day that was never edited.
pub fn default_record(date: IsoDate) -> DailyRecord {
    DailyRecord::new(date)
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, default_record, IsoDate};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn default_record_is_deterministic() {
        let date = IsoDate::parse("2024-06-15").unwrap();
        assert_eq!(default_record(date), default_record(date));
        assert_eq!(default_record(date).date, date);
    }
}
