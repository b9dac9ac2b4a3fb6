//! Month/year picker state machine.
//!
//! The picker edits a temporary (year, month) copy of the committed
//! [`CalendarSelection`]; nothing reaches the committed selection until
//! [`DatePicker::confirm`]. Transitions that are not valid in the current
//! mode are ignored.

use crate::calendar::CalendarSelection;
use crate::constants::{MONTHS_PER_YEAR, PICKER_FIRST_YEAR, PICKER_LAST_YEAR};
use std::ops::RangeInclusive;
use tracing::debug;

/// What the picker grid is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    MonthSelect,
    YearSelect,
}

/// Request to center a year in the year list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTarget {
    pub year: i32,
    /// Position of `year` in [`DatePicker::years`], if listed.
    pub index: Option<usize>,
}

/// An open date picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    mode: PickerMode,
    temp: CalendarSelection,
    pending_scroll: Option<ScrollTarget>,
}

impl DatePicker {
    /// Opens the picker in month mode, seeded from the committed selection.
    pub fn open(committed: CalendarSelection) -> Self {
        Self {
            mode: PickerMode::MonthSelect,
            temp: committed,
            pending_scroll: None,
        }
    }

    /// Years offered in year mode.
    pub fn years() -> RangeInclusive<i32> {
        PICKER_FIRST_YEAR..=PICKER_LAST_YEAR
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    /// The selection that `confirm` would commit.
    pub fn pending(&self) -> CalendarSelection {
        self.temp
    }

    /// Switches between month and year mode. Entering year mode queues one
    /// scroll request centering the pending year.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            PickerMode::MonthSelect => {
                self.queue_scroll();
                PickerMode::YearSelect
            }
            PickerMode::YearSelect => {
                self.pending_scroll = None;
                PickerMode::MonthSelect
            }
        };
    }

    /// Moves the pending year by `delta`. Month mode only.
    pub fn bump_year(&mut self, delta: i32) {
        if self.mode != PickerMode::MonthSelect {
            debug!("Ignoring year bump outside month mode");
            return;
        }
        self.temp = self.temp.shift_years(delta);
    }

    /// Sets the pending month. Month mode only; out-of-range indices are ignored.
    pub fn pick_month(&mut self, month_index: u8) {
        if self.mode != PickerMode::MonthSelect || month_index >= MONTHS_PER_YEAR {
            debug!("Ignoring month pick {}", month_index);
            return;
        }
        self.temp.month_index = month_index;
    }

    /// Sets the pending year and returns to month mode. Year mode only; the
    /// year must be one of [`DatePicker::years`].
    pub fn pick_year(&mut self, year: i32) {
        if self.mode != PickerMode::YearSelect || !Self::years().contains(&year) {
            debug!("Ignoring year pick {}", year);
            return;
        }
        self.temp.year = year;
        self.mode = PickerMode::MonthSelect;
        self.pending_scroll = None;
    }

    /// Hands out the queued scroll request, at most once per entry into year mode.
    pub fn take_scroll_target(&mut self) -> Option<ScrollTarget> {
        self.pending_scroll.take()
    }

    /// Closes the picker and returns the selection to commit.
    pub fn confirm(self) -> CalendarSelection {
        self.temp
    }

    /// Closes the picker without committing anything.
    pub fn cancel(self) {}

    fn queue_scroll(&mut self) {
        let year = self.temp.year;
        let index = Self::years()
            .contains(&year)
            .then(|| (year - PICKER_FIRST_YEAR) as usize);
        self.pending_scroll = Some(ScrollTarget { year, index });
    }
}

/// A committed selection plus an optionally open picker.
///
/// This is the piece views embed: it guarantees the committed selection only
/// ever changes through a confirmed picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    committed: CalendarSelection,
    picker: Option<DatePicker>,
}

impl SelectionState {
    pub fn new(committed: CalendarSelection) -> Self {
        Self {
            committed,
            picker: None,
        }
    }

    pub fn committed(&self) -> CalendarSelection {
        self.committed
    }

    /// Opens the picker, replacing any open one.
    pub fn open_picker(&mut self) -> &mut DatePicker {
        self.picker.insert(DatePicker::open(self.committed))
    }

    pub fn picker(&self) -> Option<&DatePicker> {
        self.picker.as_ref()
    }

    pub fn picker_mut(&mut self) -> Option<&mut DatePicker> {
        self.picker.as_mut()
    }

    /// Commits the open picker. No-op when no picker is open.
    pub fn confirm_picker(&mut self) -> CalendarSelection {
        if let Some(picker) = self.picker.take() {
            self.committed = picker.confirm();
            debug!("Committed calendar selection {:?}", self.committed);
        }
        self.committed
    }

    /// Discards the open picker. No-op when no picker is open.
    pub fn cancel_picker(&mut self) {
        if let Some(picker) = self.picker.take() {
            picker.cancel();
        }
    }

    /// Moves the committed selection directly, closing any open picker. Used
    /// by prev/next navigation.
    pub fn navigate(&mut self, to: CalendarSelection) {
        self.picker = None;
        self.committed = to;
    }
}
