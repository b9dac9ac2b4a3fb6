//! Reminder store.
//!
//! Reminders are kept in insertion order and written through to durable
//! storage after every mutation. The human-readable frequency is derived from
//! the selected weekdays on every read, so it can never drift from them.

use crate::calendar::Weekday;
use crate::constants::{DEFAULT_REMINDER_TIME, DEFAULT_REMINDER_TITLE, STORAGE_KEY_REMINDERS};
use crate::errors::AppResult;
use crate::storage::{decode_collection, encode_collection, SharedStore};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How often a reminder repeats, derived from its days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    EveryDay,
    Weekdays,
    Custom,
}

impl Frequency {
    /// Classifies a set of days. Only the exact Saturday..Wednesday set counts
    /// as the working week.
    pub fn from_days(days: &BTreeSet<Weekday>) -> Self {
        if days.len() == Weekday::ALL.len() {
            Frequency::EveryDay
        } else if days.len() == Weekday::WORKING.len()
            && Weekday::WORKING.iter().all(|d| days.contains(d))
        {
            Frequency::Weekdays
        } else {
            Frequency::Custom
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::EveryDay => "هر روز",
            Frequency::Weekdays => "روزهای هفته",
            Frequency::Custom => "سفارشی",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        [Frequency::EveryDay, Frequency::Weekdays, Frequency::Custom]
            .into_iter()
            .find(|f| f.label() == label)
    }
}

/// Convenience wrapper around [`Frequency::from_days`].
pub fn frequency_label(days: &BTreeSet<Weekday>) -> &'static str {
    Frequency::from_days(days).label()
}

/// Checks that `time` is a 24-hour `HH:MM` time.
pub fn is_valid_time(time: &str) -> bool {
    time.len() == 5 && NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    /// `HH:MM`
    pub time: String,
    pub days: BTreeSet<Weekday>,
    pub active: bool,
}

impl Reminder {
    pub fn frequency(&self) -> Frequency {
        Frequency::from_days(&self.days)
    }

    pub fn frequency_label(&self) -> &'static str {
        self.frequency().label()
    }
}

/// Fields for creating or editing a reminder. Absent fields keep their
/// current value on edit and take the defaults on create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderDraft {
    pub title: Option<String>,
    pub time: Option<String>,
    pub days: Option<BTreeSet<Weekday>>,
    pub active: Option<bool>,
}

impl ReminderDraft {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days = Some(days.into_iter().collect());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Source of wall-clock milliseconds used to mint reminder ids.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Serialize, Deserialize)]
struct StoredReminder {
    id: i64,
    title: String,
    time: String,
    #[serde(default)]
    days: Option<BTreeSet<Weekday>>,
    #[serde(default = "default_active")]
    active: bool,
    // Written for older readers; the days are authoritative.
    #[serde(default)]
    frequency: Option<String>,
}

fn default_active() -> bool {
    true
}

impl From<StoredReminder> for Reminder {
    fn from(stored: StoredReminder) -> Self {
        let days = stored.days.unwrap_or_else(|| {
            // Records without days only carry the label.
            match stored.frequency.as_deref().and_then(Frequency::from_label) {
                Some(Frequency::EveryDay) => Weekday::ALL.into_iter().collect(),
                Some(Frequency::Weekdays) => Weekday::WORKING.into_iter().collect(),
                _ => BTreeSet::new(),
            }
        });
        Reminder {
            id: stored.id,
            title: stored.title,
            time: stored.time,
            days,
            active: stored.active,
        }
    }
}

impl From<&Reminder> for StoredReminder {
    fn from(reminder: &Reminder) -> Self {
        StoredReminder {
            id: reminder.id,
            title: reminder.title.clone(),
            time: reminder.time.clone(),
            days: Some(reminder.days.clone()),
            active: reminder.active,
            frequency: Some(reminder.frequency_label().to_string()),
        }
    }
}

/// The two reminders a fresh install starts with.
pub fn default_reminders() -> Vec<Reminder> {
    vec![
        Reminder {
            id: 1,
            title: "تنفس صبحگاهی".to_string(),
            time: "08:00".to_string(),
            days: Weekday::ALL.into_iter().collect(),
            active: true,
        },
        Reminder {
            id: 2,
            title: "کار عمیق".to_string(),
            time: "14:00".to_string(),
            days: Weekday::WORKING.into_iter().collect(),
            active: true,
        },
    ]
}

/// Ordered reminder list with write-through persistence.
pub struct ReminderStore {
    reminders: Vec<Reminder>,
    last_id: i64,
    clock: Arc<dyn Clock>,
    storage: Option<SharedStore>,
}

impl std::fmt::Debug for ReminderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderStore")
            .field("reminders", &self.reminders)
            .field("last_id", &self.last_id)
            .field("persistent", &self.storage.is_some())
            .finish()
    }
}

impl ReminderStore {
    /// A store holding the defaults that is never persisted.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(default_reminders(), clock, None)
    }

    /// Rehydrates reminders from `storage`.
    ///
    /// Missing data, read failures and parse failures all start from
    /// [`default_reminders`].
    pub fn load(storage: SharedStore, clock: Arc<dyn Clock>) -> Self {
        let reminders = match storage.get(STORAGE_KEY_REMINDERS) {
            Ok(Some(raw)) => match decode_collection::<StoredReminder>(&raw) {
                Ok(stored) => stored.into_iter().map(Reminder::from).collect(),
                Err(e) => {
                    warn!("Failed to parse stored reminders, using defaults: {}", e);
                    default_reminders()
                }
            },
            Ok(None) => {
                debug!("No stored reminders, using defaults");
                default_reminders()
            }
            Err(e) => {
                warn!("Failed to read stored reminders, using defaults: {}", e);
                default_reminders()
            }
        };
        Self::from_parts(reminders, clock, Some(storage))
    }

    fn from_parts(reminders: Vec<Reminder>, clock: Arc<dyn Clock>, storage: Option<SharedStore>) -> Self {
        let last_id = reminders.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            reminders,
            last_id,
            clock,
            storage,
        }
    }

    pub fn list(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn get(&self, id: i64) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    /// Appends a new active reminder built from `draft` plus defaults.
    pub fn add(&mut self, draft: ReminderDraft) -> AppResult<Reminder> {
        let reminder = Reminder {
            id: self.next_id(),
            title: draft
                .title
                .unwrap_or_else(|| DEFAULT_REMINDER_TITLE.to_string()),
            time: draft
                .time
                .unwrap_or_else(|| DEFAULT_REMINDER_TIME.to_string()),
            days: draft
                .days
                .unwrap_or_else(|| Weekday::WORKING.into_iter().collect()),
            active: true,
        };
        info!("Adding reminder {} at {}", reminder.id, reminder.time);
        let before = self.reminders.clone();
        self.reminders.push(reminder.clone());
        self.commit(before)?;
        Ok(reminder)
    }

    /// Applies the fields present in `draft` to reminder `id`.
    ///
    /// Returns the updated reminder, or `None` (without touching storage)
    /// when no reminder has that id.
    pub fn update(&mut self, id: i64, draft: ReminderDraft) -> AppResult<Option<Reminder>> {
        let before = self.reminders.clone();
        let Some(reminder) = self.reminders.iter_mut().find(|r| r.id == id) else {
            debug!("Ignoring update of unknown reminder {}", id);
            return Ok(None);
        };

        if let Some(title) = draft.title {
            reminder.title = title;
        }
        if let Some(time) = draft.time {
            reminder.time = time;
        }
        if let Some(days) = draft.days {
            reminder.days = days;
        }
        if let Some(active) = draft.active {
            reminder.active = active;
        }
        let updated = reminder.clone();

        self.commit(before)?;
        Ok(Some(updated))
    }

    /// Deletes reminder `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> AppResult<bool> {
        let Some(index) = self.reminders.iter().position(|r| r.id == id) else {
            debug!("Ignoring removal of unknown reminder {}", id);
            return Ok(false);
        };
        let before = self.reminders.clone();
        self.reminders.remove(index);
        self.commit(before)?;
        info!("Removed reminder {}", id);
        Ok(true)
    }

    // Time-based, but never repeats or goes backwards when the clock stalls.
    fn next_id(&mut self) -> i64 {
        let id = self.clock.now_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    // Persists the current list, or puts `before` back if that fails.
    fn commit(&mut self, before: Vec<Reminder>) -> AppResult<()> {
        if let Err(e) = self.persist() {
            warn!("Failed to persist reminders, reverting: {}", e);
            self.reminders = before;
            return Err(e);
        }
        Ok(())
    }

    fn persist(&self) -> AppResult<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        let stored: Vec<StoredReminder> = self.reminders.iter().map(StoredReminder::from).collect();
        storage.set(STORAGE_KEY_REMINDERS, &encode_collection(&stored)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::io;

    struct FixedClock(i64);

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

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0
        }
    }

    fn days(list: &[Weekday]) -> BTreeSet<Weekday> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_frequency_labels() {
        assert_eq!(frequency_label(&days(&Weekday::ALL)), "هر روز");
        assert_eq!(frequency_label(&days(&Weekday::WORKING)), "روزهای هفته");
        assert_eq!(
            frequency_label(&days(&[Weekday::Saturday, Weekday::Friday])),
            "سفارشی"
        );
        // Five days that are not Saturday..Wednesday
        assert_eq!(
            frequency_label(&days(&[
                Weekday::Sunday,
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday
            ])),
            "سفارشی"
        );
        assert_eq!(frequency_label(&BTreeSet::new()), "سفارشی");
    }

    #[test]
    fn test_time_validation() {
        assert!(is_valid_time("09:00"));
        assert!(is_valid_time("23:59"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("9:00"));
        assert!(!is_valid_time("morning"));
    }

    #[test]
    fn test_load_without_data_uses_defaults() {
        let store = ReminderStore::load(Arc::new(MemoryStore::new()), Arc::new(SystemClock));
        let list = store.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].frequency_label(), "هر روز");
        assert_eq!(list[1].frequency_label(), "روزهای هفته");
    }

    #[test]
    fn test_load_with_corrupt_data_uses_defaults() {
        let storage = Arc::new(MemoryStore::with_values([(STORAGE_KEY_REMINDERS, "[{oops")]));
        let store = ReminderStore::load(storage, Arc::new(SystemClock));
        assert_eq!(store.list(), default_reminders().as_slice());
    }

    #[test]
    fn test_load_accepts_legacy_array() {
        let legacy = r#"[
            {"id": 7, "title": "Walk", "time": "17:30", "frequency": "سفارشی", "active": false, "days": ["ش", "ج"]},
            {"id": 8, "title": "Water", "time": "10:00", "frequency": "هر روز", "active": true}
        ]"#;
        let storage = Arc::new(MemoryStore::with_values([(STORAGE_KEY_REMINDERS, legacy)]));
        let store = ReminderStore::load(storage, Arc::new(SystemClock));

        let walk = store.get(7).unwrap();
        assert!(!walk.active);
        assert_eq!(walk.days, days(&[Weekday::Saturday, Weekday::Friday]));

        let water = store.get(8).unwrap();
        assert_eq!(water.frequency(), Frequency::EveryDay);
    }

    #[test]
    fn test_add_uses_draft_defaults() {
        let mut store = ReminderStore::in_memory(Arc::new(FixedClock(1_000)));
        let added = store.add(ReminderDraft::default()).unwrap();

        assert_eq!(added.title, "مدیتیشن");
        assert_eq!(added.time, "09:00");
        assert_eq!(added.frequency(), Frequency::Weekdays);
        assert!(added.active);
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn test_ids_strictly_increase_when_clock_stalls() {
        let mut store = ReminderStore::in_memory(Arc::new(FixedClock(5_000)));
        let a = store.add(ReminderDraft::default()).unwrap();
        let b = store.add(ReminderDraft::default()).unwrap();
        let c = store.add(ReminderDraft::default()).unwrap();

        assert_eq!(a.id, 5_000);
        assert!(b.id > a.id);
        assert!(c.id > b.id);
    }

    #[test]
    fn test_ids_exceed_loaded_ids() {
        let legacy = r#"[{"id": 9000, "title": "x", "time": "10:00", "days": []}]"#;
        let storage = Arc::new(MemoryStore::with_values([(STORAGE_KEY_REMINDERS, legacy)]));
        let mut store = ReminderStore::load(storage, Arc::new(FixedClock(10)));

        let added = store.add(ReminderDraft::default()).unwrap();
        assert_eq!(added.id, 9001);
    }

    #[test]
    fn test_update_merges_and_relabels() {
        let mut store = ReminderStore::in_memory(Arc::new(SystemClock));
        let updated = store
            .update(2, ReminderDraft::default().days(Weekday::ALL).active(false))
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "کار عمیق");
        assert_eq!(updated.time, "14:00");
        assert!(!updated.active);
        assert_eq!(store.get(2).unwrap().frequency_label(), "هر روز");
    }

    #[test]
    fn test_update_and_remove_unknown_ids_are_noops() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = ReminderStore::load(storage.clone(), Arc::new(SystemClock));

        assert_eq!(store.update(404, ReminderDraft::default().title("x")).unwrap(), None);
        assert!(!store.remove(404).unwrap());
        assert_eq!(store.list().len(), 2);
        // Nothing was written because nothing changed
        assert_eq!(storage.get(STORAGE_KEY_REMINDERS).unwrap(), None);
    }

    #[test]
    fn test_mutations_are_written_through() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = ReminderStore::load(storage.clone(), Arc::new(FixedClock(42_000)));

        store
            .add(ReminderDraft::default().title("Stretch").time("11:15"))
            .unwrap();
        store.remove(1).unwrap();

        let raw = storage.get(STORAGE_KEY_REMINDERS).unwrap().unwrap();
        assert!(raw.contains("\"version\":1"));

        let reloaded = ReminderStore::load(storage, Arc::new(SystemClock));
        let ids: Vec<i64> = reloaded.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 42_000]);
        assert_eq!(reloaded.get(42_000).unwrap().title, "Stretch");
    }

    #[test]
    fn test_failed_writes_leave_list_unchanged() {
        let mut store = ReminderStore::load(Arc::new(ReadOnlyStore), Arc::new(FixedClock(5_000)));
        let before = store.list().to_vec();

        assert!(store.add(ReminderDraft::default()).is_err());
        assert_eq!(store.list(), before.as_slice());

        assert!(store
            .update(1, ReminderDraft::default().title("Changed").active(false))
            .is_err());
        assert_eq!(store.list(), before.as_slice());

        assert!(store.remove(2).is_err());
        assert_eq!(store.list(), before.as_slice());
    }
}
