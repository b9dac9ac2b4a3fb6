//! Journal store: one mood + note per calendar day.
//!
//! Entries are keyed by the full `(year, month_index, day)` tuple so notes
//! written in different months never overwrite each other. Views that think
//! in "day of the displayed month" use [`JournalStore::month`], which binds a
//! [`CalendarSelection`] and exposes a day-keyed API.
//!
//! When constructed with [`JournalStore::load`], every mutation is written
//! through to the key-value store before the call returns.

use crate::calendar::CalendarSelection;
use crate::constants::STORAGE_KEY_JOURNAL;
use crate::errors::AppResult;
use crate::insights;
use crate::mood::Mood;
use crate::storage::{decode_collection, encode_collection, SharedStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A single day's journal entry.
///
/// The text is never empty or whitespace-only while stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub mood: Mood,
    pub text: String,
}

impl JournalEntry {
    pub fn new(mood: Mood, text: impl Into<String>) -> Self {
        Self {
            mood,
            text: text.into(),
        }
    }
}

/// Full key of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    pub year: i32,
    pub month_index: u8,
    pub day: u32,
}

impl EntryKey {
    pub fn new(month: CalendarSelection, day: u32) -> Self {
        Self {
            year: month.year,
            month_index: month.month_index,
            day,
        }
    }

    /// The month this key belongs to.
    pub fn month(&self) -> CalendarSelection {
        CalendarSelection {
            year: self.year,
            month_index: self.month_index,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct StoredEntry {
    #[serde(flatten)]
    key: EntryKey,
    mood: Mood,
    text: String,
}

/// All journal entries, optionally backed by durable storage.
#[derive(Default)]
pub struct JournalStore {
    entries: BTreeMap<EntryKey, JournalEntry>,
    storage: Option<SharedStore>,
}

impl std::fmt::Debug for JournalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JournalStore")
            .field("entries", &self.entries.len())
            .field("persistent", &self.storage.is_some())
            .finish()
    }
}

impl JournalStore {
    /// An empty store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Rehydrates the journal from `storage`.
    ///
    /// Missing, unreadable or unparsable data never fails the load: the
    /// journal starts from the built-in sample entries instead.
    pub fn load(storage: SharedStore) -> Self {
        let entries = match storage.get(STORAGE_KEY_JOURNAL) {
            Ok(Some(raw)) => match decode_collection::<StoredEntry>(&raw) {
                Ok(stored) => stored
                    .into_iter()
                    .filter(|s| !s.text.trim().is_empty())
                    .map(|s| (s.key, JournalEntry::new(s.mood, s.text)))
                    .collect(),
                Err(e) => {
                    warn!("Failed to parse stored journal, using samples: {}", e);
                    sample_entries()
                }
            },
            Ok(None) => {
                debug!("No stored journal, starting from samples");
                sample_entries()
            }
            Err(e) => {
                warn!("Failed to read stored journal, using samples: {}", e);
                sample_entries()
            }
        };

        Self {
            entries,
            storage: Some(storage),
        }
    }

    /// Creates or replaces the entry under `key`, or removes it when `text`
    /// is empty after trimming.
    ///
    /// If the write to storage fails the entry is restored to its previous
    /// state before the error is returned.
    pub fn upsert(&mut self, key: EntryKey, mood: Mood, text: &str) -> AppResult<()> {
        let previous = if text.trim().is_empty() {
            self.entries.remove(&key)
        } else {
            self.entries.insert(key, JournalEntry::new(mood, text))
        };

        if let Err(e) = self.persist() {
            warn!("Failed to persist journal entry for {:?}: {}", key, e);
            match previous {
                Some(entry) => self.entries.insert(key, entry),
                None => self.entries.remove(&key),
            };
            return Err(e);
        }

        debug!("Updated journal entry for {:?}", key);
        Ok(())
    }

    pub fn get(&self, key: EntryKey) -> Option<&JournalEntry> {
        self.entries.get(&key)
    }

    /// Every entry, ordered by date.
    pub fn iter(&self) -> impl Iterator<Item = (&EntryKey, &JournalEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Day-keyed view of one month.
    pub fn month(&mut self, month: CalendarSelection) -> MonthJournal<'_> {
        MonthJournal { store: self, month }
    }

    /// Entries of one month keyed by day.
    pub fn month_entries(&self, month: CalendarSelection) -> BTreeMap<u32, &JournalEntry> {
        let start = EntryKey::new(month, 0);
        let end = EntryKey::new(month, u32::MAX);
        self.entries
            .range(start..=end)
            .map(|(key, entry)| (key.day, entry))
            .collect()
    }

    fn persist(&self) -> AppResult<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };

        let stored: Vec<StoredEntry> = self
            .entries
            .iter()
            .map(|(key, entry)| StoredEntry {
                key: *key,
                mood: entry.mood,
                text: entry.text.clone(),
            })
            .collect();
        storage.set(STORAGE_KEY_JOURNAL, &encode_collection(&stored)?)
    }
}

/// The journal as seen from one displayed month.
pub struct MonthJournal<'a> {
    store: &'a mut JournalStore,
    month: CalendarSelection,
}

impl MonthJournal<'_> {
    /// Saves `text` and `mood` for `day`; empty text deletes the day's entry.
    ///
    /// `day` is not range-checked.
    pub fn upsert(&mut self, day: u32, mood: Mood, text: &str) -> AppResult<()> {
        self.store.upsert(EntryKey::new(self.month, day), mood, text)
    }

    pub fn get(&self, day: u32) -> Option<&JournalEntry> {
        self.store.get(EntryKey::new(self.month, day))
    }

    pub fn entries(&self) -> BTreeMap<u32, &JournalEntry> {
        self.store.month_entries(self.month)
    }

    pub fn average_mood_score(&self) -> f64 {
        insights::average_mood_score(self.entries().into_values())
    }

    pub fn search(&self, query: &str) -> Vec<(u32, &JournalEntry)> {
        insights::search(self.entries(), query)
    }
}

/// Entries a fresh install starts with, all in the default month.
pub fn sample_entries() -> BTreeMap<EntryKey, JournalEntry> {
    let month = CalendarSelection::default();
    BTreeMap::from([
        (
            EntryKey::new(month, 2),
            JournalEntry::new(Mood::Happy, "امروز پروژه را عالی پیش بردم."),
        ),
        (
            EntryKey::new(month, 5),
            JournalEntry::new(Mood::Calm, "یک روز آرام با پیاده‌روی طولانی."),
        ),
        (
            EntryKey::new(month, 12),
            JournalEntry::new(Mood::Stressed, "جلسه سنگینی داشتیم و کمی خسته‌ام."),
        ),
        (
            EntryKey::new(month, 18),
            JournalEntry::new(Mood::Neutral, "روز معمولی بود، کار خاصی نکردم."),
        ),
    ])
}

#[cfg(test)]
mod tests;
