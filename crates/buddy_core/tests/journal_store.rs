use buddy_core::db::{open_db, open_db_in_memory};
use buddy_core::{
    default_record, DayPatch, DayStore, IsoDate, JournalService, KvRepository, MemoryKvRepository,
    Mood, RecordValidationError, RepoError, RepoResult, SqliteKvRepository, TaskEntry, TaskSlot,
    STORE_KEY,
};

fn date(value: &str) -> IsoDate {
    IsoDate::parse(value).unwrap()
}

fn mood(value: i64) -> Mood {
    Mood::new(value).unwrap()
}

/// Storage that refuses every operation, like a full or locked medium.
struct BrokenRepository;

impl KvRepository for BrokenRepository {
    fn get(&self, _key: &str) -> RepoResult<Option<String>> {
        Err(RepoError::Unavailable("read refused".to_string()))
    }

    fn put(&self, _key: &str, _value: &str) -> RepoResult<()> {
        Err(RepoError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> RepoResult<()> {
        Err(RepoError::Unavailable("remove refused".to_string()))
    }
}

#[test]
fn get_day_on_missing_date_returns_default_and_does_not_write() {
    let service = JournalService::new(MemoryKvRepository::new());
    let store = service.load();

    let record = service.get_day(&store, date("2024-06-15"));
    assert_eq!(record, default_record(date("2024-06-15")));
    assert!(store.is_empty());
    assert_eq!(service.repo().get(STORE_KEY).unwrap(), None);
}

#[test]
fn set_day_merges_at_field_granularity() {
    let service = JournalService::new(MemoryKvRepository::new());
    let day = date("2024-06-15");

    let store = service.set_day(
        &DayStore::new(),
        day,
        &DayPatch {
            mood: Some(mood(3)),
            ..DayPatch::default()
        },
    );
    let store = service.set_day(
        &store,
        day,
        &DayPatch {
            notes: Some("x".to_string()),
            ..DayPatch::default()
        },
    );

    let record = store.get_day(day);
    assert_eq!(record.mood, mood(3));
    assert_eq!(record.notes, "x");
    let mut expected = default_record(day);
    expected.mood = mood(3);
    expected.notes = "x".to_string();
    assert_eq!(record, expected);
}

#[test]
fn every_mutation_is_persisted_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.sqlite3");
    let day = date("2024-06-02");

    {
        let conn = open_db(&path).unwrap();
        let service = JournalService::new(SqliteKvRepository::new(&conn));
        let store = service.load();
        let first = TaskSlot::must_do(1).unwrap();
        let store = service.set_task_text(&store, day, first, "Ship");
        let store = service.toggle_task(&store, day, first);
        service.set_day(
            &store,
            day,
            &DayPatch {
                kid_time: Some(true),
                ..DayPatch::default()
            },
        );
    }

    let conn = open_db(&path).unwrap();
    let service = JournalService::new(SqliteKvRepository::new(&conn));
    let reloaded = service.load();
    let record = reloaded.get_day(day);
    assert_eq!(record.must_dos[0], TaskEntry::new("Ship", true));
    assert!(record.kid_time);
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn persisted_value_uses_fixed_key_and_camel_case_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = JournalService::new(SqliteKvRepository::new(&conn));
    service.set_day(
        &DayStore::new(),
        date("2024-06-01"),
        &DayPatch {
            boundary_kept: Some(true),
            ..DayPatch::default()
        },
    );

    let raw = service.repo().get("burnout-buddy-v1").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["2024-06-01"]["boundaryKept"], true);
    assert_eq!(value["2024-06-01"]["date"], "2024-06-01");
}

#[test]
fn clear_all_empties_store_and_persisted_copy() {
    let service = JournalService::new(MemoryKvRepository::new());
    let store = service.set_day(
        &DayStore::new(),
        date("2024-06-01"),
        &DayPatch {
            mood: Some(mood(9)),
            ..DayPatch::default()
        },
    );
    assert!(service.repo().get(STORE_KEY).unwrap().is_some());

    let cleared = service.clear_all(store);
    assert!(cleared.is_empty());
    assert_eq!(service.repo().get(STORE_KEY).unwrap(), None);
    assert!(service.load().is_empty());
}

#[test]
fn load_with_corrupted_bytes_yields_empty_store_without_overwriting() {
    let repo = MemoryKvRepository::new();
    repo.put(STORE_KEY, r#"{"2024-06-01": {"mood": 4"#).unwrap();
    let service = JournalService::new(repo);

    assert!(service.load().is_empty());
    assert_eq!(
        service.repo().get(STORE_KEY).unwrap().as_deref(),
        Some(r#"{"2024-06-01": {"mood": 4"#)
    );
}

#[test]
fn load_tolerates_legacy_shapes() {
    let repo = MemoryKvRepository::new();
    repo.put(
        STORE_KEY,
        r#"{"2024-06-01": {"date": "2024-06-01", "mood": 6, "mustDos": [{"text": "a", "done": true}]},
            "2024-06-02": null}"#,
    )
    .unwrap();
    let service = JournalService::new(repo);

    let store = service.load();
    assert_eq!(store.len(), 1);
    let record = store.get_day(date("2024-06-01"));
    assert_eq!(record.mood, mood(6));
    assert_eq!(record.must_dos[0], TaskEntry::new("a", true));
    assert_eq!(record.must_dos[2], TaskEntry::default());
}

#[test]
fn storage_failures_degrade_silently() {
    let service = JournalService::new(BrokenRepository);

    let store = service.load();
    assert!(store.is_empty());

    let store = service.set_day(
        &store,
        date("2024-06-01"),
        &DayPatch {
            mood: Some(mood(2)),
            ..DayPatch::default()
        },
    );
    assert_eq!(store.get_day(date("2024-06-01")).mood, mood(2));

    assert!(service.clear_all(store).is_empty());
}

#[test]
fn toggle_and_text_edits_preserve_the_other_half_of_a_task() {
    let service = JournalService::new(MemoryKvRepository::new());
    let day = date("2024-06-03");

    let store = service.toggle_task(&DayStore::new(), day, TaskSlot::Nice);
    let store = service.set_task_text(&store, day, TaskSlot::Nice, "Stretch");
    assert_eq!(store.get_day(day).nice, TaskEntry::new("Stretch", true));

    let store = service.toggle_task(&store, day, TaskSlot::Nice);
    assert_eq!(store.get_day(day).nice, TaskEntry::new("Stretch", false));
}

#[test]
fn import_merges_by_date_and_persists() {
    let service = JournalService::new(MemoryKvRepository::new());
    let store = service.set_day(
        &DayStore::new(),
        date("2024-06-01"),
        &DayPatch {
            notes: Some("local".to_string()),
            ..DayPatch::default()
        },
    );
    let store = service.set_day(
        &store,
        date("2024-06-02"),
        &DayPatch {
            notes: Some("local".to_string()),
            ..DayPatch::default()
        },
    );

    let imported = service
        .import_json(&store, r#"{"2024-06-02": {"notes": "imported"}, "2024-06-03": {}}"#)
        .unwrap();
    assert_eq!(imported.len(), 3);
    assert_eq!(imported.get_day(date("2024-06-01")).notes, "local");
    assert_eq!(imported.get_day(date("2024-06-02")).notes, "imported");
    assert_eq!(service.load(), imported);
}

#[test]
fn import_rejects_garbage_and_keeps_store() {
    let service = JournalService::new(MemoryKvRepository::new());
    let store = service.set_day(
        &DayStore::new(),
        date("2024-06-01"),
        &DayPatch {
            mood: Some(mood(8)),
            ..DayPatch::default()
        },
    );

    assert!(service.import_json(&store, "not json").is_err());
    assert_eq!(service.load(), store);
}

#[test]
fn task_edits_reach_every_must_do_and_reject_positions_past_the_last() {
    let service = JournalService::new(MemoryKvRepository::new());
    let day = date("2024-06-15");

    let mut store = DayStore::new();
    for position in 1..=3 {
        let slot = TaskSlot::must_do(position).unwrap();
        store = service.set_task_text(&store, day, slot, format!("task {position}"));
        store = service.toggle_task(&store, day, slot);
    }

    let record = store.get_day(day);
    assert_eq!(record.must_dos[2], TaskEntry::new("task 3", true));
    assert!(record.must_dos.iter().all(|task| task.done));
    assert_eq!(
        TaskSlot::must_do(4),
        Err(RecordValidationError::MustDoOutOfRange(4))
    );
}
