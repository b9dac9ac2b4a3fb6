//! Calendar model: the committed (year, month) selection and the Solar Hijri
//! month metadata the views render.
//!
//! Years are Solar Hijri years (e.g. 1402) and months are zero-based indices
//! into [`MONTH_NAMES`]. Every month is rendered with a fixed set of
//! [`DAY_SLOTS`] day cells; [`CalendarSelection::days_in_month`] gives the real
//! length for charts.

use crate::constants::{DAY_SLOTS, DEFAULT_MONTH_INDEX, DEFAULT_YEAR, MONTHS_PER_YEAR};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Month names, Farvardin first.
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Days of the week in calendar order. The week starts on Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "ش")]
    Saturday,
    #[serde(rename = "ی")]
    Sunday,
    #[serde(rename = "د")]
    Monday,
    #[serde(rename = "س")]
    Tuesday,
    #[serde(rename = "چ")]
    Wednesday,
    #[serde(rename = "پ")]
    Thursday,
    #[serde(rename = "ج")]
    Friday,
}

impl Weekday {
    /// All days, Saturday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Saturday,
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// The working week, Saturday through Wednesday.
    pub const WORKING: [Weekday; 5] = [
        Weekday::Saturday,
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
    ];

    /// Single-letter token shown in day pickers and calendar headers.
    pub fn token(self) -> &'static str {
        match self {
            Weekday::Saturday => "ش",
            Weekday::Sunday => "ی",
            Weekday::Monday => "د",
            Weekday::Tuesday => "س",
            Weekday::Wednesday => "چ",
            Weekday::Thursday => "پ",
            Weekday::Friday => "ج",
        }
    }

    /// English name, used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
        }
    }

    /// Parses a token, an English day name or its three-letter abbreviation
    /// (case-insensitive).
    pub fn parse(raw: &str) -> Option<Weekday> {
        let raw = raw.trim().to_lowercase();
        Weekday::ALL.into_iter().find(|day| {
            day.token() == raw || day.name() == raw || (raw.len() == 3 && day.name().starts_with(&raw))
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The (year, month) the calendar currently displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarSelection {
    pub year: i32,
    pub month_index: u8,
}

impl Default for CalendarSelection {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            month_index: DEFAULT_MONTH_INDEX,
        }
    }
}

impl CalendarSelection {
    /// Creates a selection, or `None` when `month_index` is not in `0..=11`.
    pub fn new(year: i32, month_index: u8) -> Option<Self> {
        (month_index < MONTHS_PER_YEAR).then_some(Self { year, month_index })
    }

    /// Display name of the month.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[usize::from(self.month_index)]
    }

    /// Day cells rendered for this month. Always `1..=31`.
    pub fn day_slots(&self) -> RangeInclusive<u32> {
        1..=DAY_SLOTS
    }

    /// Actual number of days: 31 in the first six months, 30 in the next
    /// five and 29 in Esfand.
    pub fn days_in_month(&self) -> u32 {
        match self.month_index {
            0..=5 => 31,
            11 => 29,
            _ => 30,
        }
    }

    /// The month before this one, wrapping into the previous year.
    pub fn previous_month(&self) -> Self {
        if self.month_index == 0 {
            Self {
                year: self.year - 1,
                month_index: MONTHS_PER_YEAR - 1,
            }
        } else {
            Self {
                year: self.year,
                month_index: self.month_index - 1,
            }
        }
    }

    /// The month after this one, wrapping into the next year.
    pub fn next_month(&self) -> Self {
        if self.month_index == MONTHS_PER_YEAR - 1 {
            Self {
                year: self.year + 1,
                month_index: 0,
            }
        } else {
            Self {
                year: self.year,
                month_index: self.month_index + 1,
            }
        }
    }

    /// Same month, `delta` years away.
    pub fn shift_years(&self, delta: i32) -> Self {
        Self {
            year: self.year + delta,
            month_index: self.month_index,
        }
    }
}

impl fmt::Display for CalendarSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mehr_1402() {
        let selection = CalendarSelection::default();
        assert_eq!(selection.year, 1402);
        assert_eq!(selection.month_index, 6);
        assert_eq!(selection.month_name(), "مهر");
    }

    #[test]
    fn test_new_rejects_out_of_range_month() {
        assert!(CalendarSelection::new(1402, 11).is_some());
        assert!(CalendarSelection::new(1402, 12).is_none());
    }

    #[test]
    fn test_day_slots_are_fixed() {
        let esfand = CalendarSelection::new(1402, 11).unwrap();
        assert_eq!(esfand.day_slots().count(), 31);
        assert_eq!(esfand.days_in_month(), 29);
    }

    #[test]
    fn test_days_in_month() {
        let lengths: Vec<u32> = (0..12)
            .map(|m| CalendarSelection::new(1403, m).unwrap().days_in_month())
            .collect();
        assert_eq!(lengths, vec![31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29]);
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        let farvardin = CalendarSelection::new(1403, 0).unwrap();
        assert_eq!(
            farvardin.previous_month(),
            CalendarSelection::new(1402, 11).unwrap()
        );

        let esfand = CalendarSelection::new(1403, 11).unwrap();
        assert_eq!(esfand.next_month(), CalendarSelection::new(1404, 0).unwrap());

        let mehr = CalendarSelection::new(1403, 6).unwrap();
        assert_eq!(mehr.next_month().previous_month(), mehr);
        assert_eq!(mehr.shift_years(-2).year, 1401);
    }

    #[test]
    fn test_weekday_tokens_and_serde() {
        let tokens: String = Weekday::ALL.iter().map(|d| d.token()).collect();
        assert_eq!(tokens, "شیدسچپج");

        let json = serde_json::to_string(&Weekday::Thursday).unwrap();
        assert_eq!(json, "\"پ\"");
        let back: Weekday = serde_json::from_str("\"ج\"").unwrap();
        assert_eq!(back, Weekday::Friday);
    }

    #[test]
    fn test_weekday_parse() {
        assert_eq!(Weekday::parse("ش"), Some(Weekday::Saturday));
        assert_eq!(Weekday::parse("friday"), Some(Weekday::Friday));
        assert_eq!(Weekday::parse("Mon"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("funday"), None);
    }
}
