//! Journal use-case service.
//!
//! # Responsibility
//! - Load and persist the day store through a key-value repository.
//! - Apply user edits as whole-store replacements.
//!
//! # Invariants
//! - Storage failures never reach callers: reads degrade to an empty store,
//!   writes and removals degrade to no-ops. Both are logged at `warn`.
//! - `load` and `get_day` never write.
//! - Every mutating call persists the full returned store.
//! - Log events carry counts and error text only, never journal content.

use crate::model::date::IsoDate;
use crate::model::day::{DailyRecord, DayPatch, TaskEntry, TaskSlot};
use crate::model::store::{DayStore, StoreDecodeError};
use crate::repo::kv_repo::KvRepository;
use log::{debug, info, warn};

/// Fixed key of the persisted store value.
pub const STORE_KEY: &str = "burnout-buddy-v1";

/// State holder for the journal: owns the storage handle.
pub struct JournalService<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> JournalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Storage handle this service writes through.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Reads the persisted store.
    ///
    /// Returns an empty store when nothing is persisted, the value cannot be
    /// decoded, or storage cannot be read.
    pub fn load(&self) -> DayStore {
        let raw = match self.repo.get(STORE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=store_load module=store status=empty");
                return DayStore::new();
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error error_code=read_failed error={err}"
                );
                return DayStore::new();
            }
        };

        match DayStore::from_json_lenient(&raw) {
            Ok(store) => {
                info!(
                    "event=store_load module=store status=ok days={}",
                    store.len()
                );
                store
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error error_code=decode_failed bytes={} error={err}",
                    raw.len()
                );
                DayStore::new()
            }
        }
    }

    /// Persists `store` on a best-effort basis.
    pub fn save(&self, store: &DayStore) {
        let encoded = match serde_json::to_string(store) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(
                    "event=store_save module=store status=error error_code=encode_failed error={err}"
                );
                return;
            }
        };

        match self.repo.put(STORE_KEY, &encoded) {
            Ok(()) => debug!(
                "event=store_save module=store status=ok days={} bytes={}",
                store.len(),
                encoded.len()
            ),
            Err(err) => warn!(
                "event=store_save module=store status=error error_code=write_failed error={err}"
            ),
        }
    }

    /// Stored record for `date`, or its default record. Never writes.
    pub fn get_day(&self, store: &DayStore, date: IsoDate) -> DailyRecord {
        store.get_day(date)
    }

    /// Merges `patch` into the record at `date` and persists the result.
    pub fn set_day(&self, store: &DayStore, date: IsoDate, patch: &DayPatch) -> DayStore {
        let next = store.with_day(date, patch);
        self.save(&next);
        next
    }

    /// Flips the done flag of one task line and persists the result.
    pub fn toggle_task(&self, store: &DayStore, date: IsoDate, slot: TaskSlot) -> DayStore {
        let record = store.get_day(date);
        let current = record.task(slot);
        let entry = TaskEntry::new(current.text.clone(), !current.done);
        self.set_day(store, date, &record.task_patch(slot, entry))
    }

    /// Replaces the text of one task line and persists the result.
    pub fn set_task_text(
        &self,
        store: &DayStore,
        date: IsoDate,
        slot: TaskSlot,
        text: impl Into<String>,
    ) -> DayStore {
        let record = store.get_day(date);
        let entry = TaskEntry::new(text, record.task(slot).done);
        self.set_day(store, date, &record.task_patch(slot, entry))
    }

    /// Drops every record and removes the persisted value.
    ///
    /// Callers are expected to have obtained explicit user confirmation.
    pub fn clear_all(&self, store: DayStore) -> DayStore {
        match self.repo.remove(STORE_KEY) {
            Ok(()) => info!(
                "event=store_clear module=store status=ok days={}",
                store.len()
            ),
            Err(err) => warn!(
                "event=store_clear module=store status=error error_code=remove_failed error={err}"
            ),
        }
        DayStore::new()
    }

    /// Merges a JSON export into `store` and persists the result.
    ///
    /// Imported days replace existing days with the same date.
    ///
    /// # Errors
    /// - Returns `StoreDecodeError` when `text` is not a day store export;
    ///   nothing is persisted in that case.
    pub fn import_json(&self, store: &DayStore, text: &str) -> Result<DayStore, StoreDecodeError> {
        let incoming = DayStore::from_json_lenient(text)?;
        let next = store.merged_with(&incoming);
        info!(
            "event=store_import module=store status=ok imported_days={} total_days={}",
            incoming.len(),
            next.len()
        );
        self.save(&next);
        Ok(next)
    }
}
