use super::*;
use crate::errors::AppError;
use crate::storage::{KeyValueStore, MemoryStore};
use std::io;
use std::sync::Arc;

/// Reads nothing and refuses every write.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "read-only")))
    }

    fn remove(&self, _key: &str) -> AppResult<()> {
        Err(AppError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "read-only")))
    }
}

fn mehr() -> CalendarSelection {
    CalendarSelection::new(1402, 6).unwrap()
}

#[test]
fn test_upsert_then_get_returns_entry() {
    let mut store = JournalStore::in_memory();
    let mut month = store.month(mehr());

    month.upsert(3, Mood::Calm, "quiet morning").unwrap();

    assert_eq!(
        month.get(3),
        Some(&JournalEntry::new(Mood::Calm, "quiet morning"))
    );
}

#[test]
fn test_upsert_replaces_existing_entry() {
    let mut store = JournalStore::in_memory();
    let mut month = store.month(mehr());

    month.upsert(3, Mood::Calm, "first").unwrap();
    month.upsert(3, Mood::Sad, "second").unwrap();

    assert_eq!(month.get(3), Some(&JournalEntry::new(Mood::Sad, "second")));
    assert_eq!(month.entries().len(), 1);
}

#[test]
fn test_empty_or_whitespace_text_deletes() {
    let mut store = JournalStore::in_memory();
    let mut month = store.month(mehr());

    month.upsert(7, Mood::Happy, "great day").unwrap();
    month.upsert(7, Mood::Happy, "").unwrap();
    assert_eq!(month.get(7), None);

    month.upsert(8, Mood::Happy, "another").unwrap();
    month.upsert(8, Mood::Neutral, "  \n\t ").unwrap();
    assert_eq!(month.get(8), None);

    // Deleting a day that has no entry is harmless
    month.upsert(9, Mood::Neutral, " ").unwrap();
    assert!(month.entries().is_empty());
}

#[test]
fn test_text_is_stored_untrimmed() {
    let mut store = JournalStore::in_memory();
    let mut month = store.month(mehr());

    month.upsert(1, Mood::Neutral, "  padded  ").unwrap();

    assert_eq!(month.get(1).unwrap().text, "  padded  ");
}

#[test]
fn test_same_day_in_different_months_does_not_collide() {
    let mut store = JournalStore::in_memory();
    let aban = mehr().next_month();

    store.month(mehr()).upsert(10, Mood::Happy, "mehr note").unwrap();
    store.month(aban).upsert(10, Mood::Sad, "aban note").unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.month(mehr()).get(10).unwrap().text, "mehr note");
    assert_eq!(store.month(aban).get(10).unwrap().text, "aban note");
    assert_eq!(store.month_entries(aban).len(), 1);
}

#[test]
fn test_month_average_and_search() {
    let mut store = JournalStore::in_memory();
    let mut month = store.month(mehr());
    month.upsert(1, Mood::Happy, "project done").unwrap();
    month.upsert(2, Mood::Sad, "tired").unwrap();

    assert_eq!(month.average_mood_score(), 3.5);

    let hits = month.search("project");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, 1);
}

#[test]
fn test_load_without_stored_data_uses_samples() {
    let storage = Arc::new(MemoryStore::new());
    let mut store = JournalStore::load(storage);

    let days: Vec<u32> = store.month(CalendarSelection::default()).entries().keys().copied().collect();
    assert_eq!(days, vec![2, 5, 12, 18]);
}

#[test]
fn test_load_with_corrupt_data_uses_samples() {
    let storage = Arc::new(MemoryStore::with_values([(STORAGE_KEY_JOURNAL, "{{{")]));
    let store = JournalStore::load(storage);
    assert_eq!(store.len(), 4);
}

#[test]
fn test_mutations_are_written_through() {
    let storage = Arc::new(MemoryStore::new());
    let mut store = JournalStore::load(storage.clone());

    store.month(mehr()).upsert(30, Mood::Calm, "persist me").unwrap();
    store.month(mehr()).upsert(2, Mood::Happy, "").unwrap();

    let mut reloaded = JournalStore::load(storage.clone());
    let month = reloaded.month(mehr());
    assert_eq!(month.get(30).unwrap().text, "persist me");
    assert_eq!(month.get(2), None);

    let raw = storage.get(STORAGE_KEY_JOURNAL).unwrap().unwrap();
    assert!(raw.contains("\"version\":1"));
}

#[test]
fn test_entry_key_roundtrips_month() {
    let key = EntryKey::new(mehr(), 14);
    assert_eq!(key.month(), mehr());
    assert_eq!(key.day, 14);
}

#[test]
fn test_failed_write_restores_previous_entry() {
    let mut store = JournalStore::load(Arc::new(ReadOnlyStore));
    let before: Vec<(EntryKey, JournalEntry)> =
        store.iter().map(|(k, e)| (*k, e.clone())).collect();
    let mut month = store.month(mehr());

    // New entry
    assert!(month.upsert(9, Mood::Happy, "never saved").is_err());
    assert_eq!(month.get(9), None);

    // Replacement
    assert!(month.upsert(12, Mood::Happy, "rewritten").is_err());
    assert_eq!(month.get(12).map(|e| e.mood), Some(Mood::Stressed));

    // Deletion
    assert!(month.upsert(5, Mood::Calm, "  ").is_err());
    assert!(month.get(5).is_some());

    let after: Vec<(EntryKey, JournalEntry)> =
        store.iter().map(|(k, e)| (*k, e.clone())).collect();
    assert_eq!(after, before);
}
