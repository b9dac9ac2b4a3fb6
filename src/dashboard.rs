//! Journal & calendar state manager behind the dashboard view.
//!
//! Owns the committed month, the date picker, the day editor, search mode and
//! the notification centre, and derives the month's mood statistics on read.

use crate::calendar::CalendarSelection;
use crate::constants::HIGHLIGHTED_TODAY;
use crate::date_picker::{DatePicker, SelectionState};
use crate::errors::AppResult;
use crate::insights;
use crate::journal::{JournalEntry, JournalStore};
use crate::mood::Mood;
use crate::notifications::NotificationCenter;
use tracing::debug;

/// Draft of a day's entry while the editor sheet is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEditor {
    pub day: u32,
    pub note: String,
    pub mood: Mood,
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub mood: Option<Mood>,
    /// Highlighted as the current day. The grid has no real clock, so this is
    /// the same fixed day in every month.
    pub is_today: bool,
}

#[derive(Debug)]
pub struct Dashboard {
    selection: SelectionState,
    journal: JournalStore,
    editor: Option<DayEditor>,
    search_query: Option<String>,
    notifications: NotificationCenter,
}

impl Dashboard {
    /// Starts on the default month with the seeded notifications.
    pub fn new(journal: JournalStore) -> Self {
        Self {
            selection: SelectionState::new(CalendarSelection::default()),
            journal,
            editor: None,
            search_query: None,
            notifications: NotificationCenter::seeded(),
        }
    }

    pub fn selection(&self) -> CalendarSelection {
        self.selection.committed()
    }

    pub fn journal(&self) -> &JournalStore {
        &self.journal
    }

    // Date picker

    pub fn open_date_picker(&mut self) -> &mut DatePicker {
        self.selection.open_picker()
    }

    pub fn date_picker(&self) -> Option<&DatePicker> {
        self.selection.picker()
    }

    pub fn date_picker_mut(&mut self) -> Option<&mut DatePicker> {
        self.selection.picker_mut()
    }

    pub fn confirm_date_picker(&mut self) -> CalendarSelection {
        let before = self.selection.committed();
        let after = self.selection.confirm_picker();
        if before != after {
            // The open editor belongs to the old month.
            self.editor = None;
        }
        after
    }

    pub fn cancel_date_picker(&mut self) {
        self.selection.cancel_picker();
    }

    // Day editor

    /// Opens the editor for `day`, prefilled from its entry or blank/neutral.
    pub fn select_day(&mut self, day: u32) -> &mut DayEditor {
        let month = self.selection.committed();
        let draft = match self.journal.month_entries(month).get(&day) {
            Some(entry) => DayEditor {
                day,
                note: entry.text.clone(),
                mood: entry.mood,
            },
            None => DayEditor {
                day,
                note: String::new(),
                mood: Mood::Neutral,
            },
        };
        self.editor.insert(draft)
    }

    pub fn editor(&self) -> Option<&DayEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut DayEditor> {
        self.editor.as_mut()
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Writes the draft into the journal and closes the editor. A blank note
    /// deletes the day's entry. No-op when the editor is closed.
    pub fn save_editor(&mut self) -> AppResult<()> {
        let Some(draft) = self.editor.take() else {
            return Ok(());
        };
        let month = self.selection.committed();
        debug!("Saving editor draft for day {}", draft.day);
        self.journal
            .month(month)
            .upsert(draft.day, draft.mood, &draft.note)
    }

    /// Saves an entry for `day` of the displayed month without the editor.
    pub fn save_entry(&mut self, day: u32, mood: Mood, text: &str) -> AppResult<()> {
        let month = self.selection.committed();
        self.journal.month(month).upsert(day, mood, text)
    }

    // Search

    pub fn open_search(&mut self) {
        self.search_query.get_or_insert_with(String::new);
    }

    pub fn is_search_active(&self) -> bool {
        self.search_query.is_some()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = Some(query.into());
    }

    /// Leaves search mode and forgets the query.
    pub fn close_search(&mut self) {
        self.search_query = None;
    }

    /// Entries of the displayed month matching the current query.
    pub fn search_results(&self) -> Vec<(u32, &JournalEntry)> {
        let query = self.search_query.as_deref().unwrap_or("");
        insights::search(self.month_entries(), query)
    }

    // Derived views

    pub fn month_entries(&self) -> std::collections::BTreeMap<u32, &JournalEntry> {
        self.journal.month_entries(self.selection.committed())
    }

    pub fn average_mood_score(&self) -> f64 {
        insights::average_mood_score(self.month_entries().into_values())
    }

    pub fn average_mood_label(&self) -> &'static str {
        insights::mood_label(self.average_mood_score())
    }

    /// Cells for the fixed month grid.
    pub fn day_cells(&self) -> Vec<DayCell> {
        let month = self.selection.committed();
        let entries = self.month_entries();
        month
            .day_slots()
            .map(|day| DayCell {
                day,
                mood: entries.get(&day).map(|e| e.mood),
                is_today: day == HIGHLIGHTED_TODAY,
            })
            .collect()
    }

    // Notifications

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }
}
