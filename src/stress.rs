//! Stress chart model.
//!
//! Shows either twelve monthly points for a year or one point per day of a
//! month. The values are illustrative: they are derived from a hash of the
//! period, so every period always renders the same chart.

use crate::calendar::{CalendarSelection, MONTH_NAMES};
use crate::date_picker::SelectionState;
use blake3::Hasher;

const YEARLY_COLOR_FIRST_HALF: &str = "#fcd34d";
const YEARLY_COLOR_SECOND_HALF: &str = "#fb923c";
const MONTHLY_COLOR: &str = "#2dd4bf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartView {
    Monthly,
    #[default]
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    /// Month name or day number.
    pub name: String,
    pub value: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressChart {
    view: ChartView,
    selection: SelectionState,
}

impl Default for StressChart {
    fn default() -> Self {
        Self::new()
    }
}

impl StressChart {
    /// Yearly view of Mehr 1403.
    pub fn new() -> Self {
        Self {
            view: ChartView::Yearly,
            selection: SelectionState::new(CalendarSelection {
                year: 1403,
                month_index: 6,
            }),
        }
    }

    pub fn view(&self) -> ChartView {
        self.view
    }

    pub fn set_view(&mut self, view: ChartView) {
        self.view = view;
    }

    pub fn period(&self) -> CalendarSelection {
        self.selection.committed()
    }

    /// Date picker access; the chart follows confirmed picks.
    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    /// One year back in yearly view, one month back otherwise.
    pub fn prev(&mut self) {
        let current = self.period();
        let to = match self.view {
            ChartView::Yearly => current.shift_years(-1),
            ChartView::Monthly => current.previous_month(),
        };
        self.selection.navigate(to);
    }

    /// One year forward in yearly view, one month forward otherwise.
    pub fn next(&mut self) {
        let current = self.period();
        let to = match self.view {
            ChartView::Yearly => current.shift_years(1),
            ChartView::Monthly => current.next_month(),
        };
        self.selection.navigate(to);
    }

    /// Navigator caption.
    pub fn heading(&self) -> String {
        let period = self.period();
        match self.view {
            ChartView::Yearly => format!("سال {}", period.year),
            ChartView::Monthly => period.month_name().to_string(),
        }
    }

    pub fn series(&self) -> Vec<ChartPoint> {
        match self.view {
            ChartView::Yearly => yearly_series(self.period().year),
            ChartView::Monthly => monthly_series(self.period()),
        }
    }
}

/// Twelve points, busier in the second half of the year.
pub fn yearly_series(year: i32) -> Vec<ChartPoint> {
    let base = 40 + year.rem_euclid(10) as u32 * 2;
    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let seasonal = if i > 6 { 10 } else { 0 };
            ChartPoint {
                name: (*name).to_string(),
                value: (base + jitter(b"yearly", year, i as u32, 0, 20) + seasonal).min(100),
                color: if i < 6 {
                    YEARLY_COLOR_FIRST_HALF
                } else {
                    YEARLY_COLOR_SECOND_HALF
                },
            }
        })
        .collect()
}

/// One point per day of the month, between 30 and 79.
pub fn monthly_series(period: CalendarSelection) -> Vec<ChartPoint> {
    (1..=period.days_in_month())
        .map(|day| ChartPoint {
            name: day.to_string(),
            value: 30 + jitter(b"monthly", period.year, u32::from(period.month_index), day, 50),
            color: MONTHLY_COLOR,
        })
        .collect()
}

// Deterministic value in `0..bound`.
fn jitter(kind: &[u8], year: i32, month: u32, index: u32, bound: u32) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(kind);
    hasher.update(&year.to_le_bytes());
    hasher.update(&month.to_le_bytes());
    hasher.update(&index.to_le_bytes());
    let hash = hasher.finalize();
    let mut head = [0u8; 4];
    head.copy_from_slice(&hash.as_bytes()[..4]);
    u32::from_le_bytes(head) % bound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_yearly_mehr_1403() {
        let chart = StressChart::new();
        assert_eq!(chart.view(), ChartView::Yearly);
        assert_eq!(chart.period(), CalendarSelection::new(1403, 6).unwrap());
        assert_eq!(chart.heading(), "سال 1403");
    }

    #[test]
    fn test_yearly_series_shape() {
        let series = yearly_series(1403);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].name, "فروردین");
        assert_eq!(series[5].color, "#fcd34d");
        assert_eq!(series[6].color, "#fb923c");

        // base 46, jitter < 20, +10 after month 6
        for (i, point) in series.iter().enumerate() {
            let floor = if i > 6 { 56 } else { 46 };
            assert!(point.value >= floor && point.value < floor + 20, "{:?}", point);
        }
    }

    #[test]
    fn test_yearly_values_are_capped() {
        for year in 1300..1500 {
            assert!(yearly_series(year).iter().all(|p| p.value <= 100));
        }
    }

    #[test]
    fn test_monthly_series_follows_month_length() {
        let farvardin = monthly_series(CalendarSelection::new(1403, 0).unwrap());
        let mehr = monthly_series(CalendarSelection::new(1403, 6).unwrap());
        let esfand = monthly_series(CalendarSelection::new(1403, 11).unwrap());

        assert_eq!(farvardin.len(), 31);
        assert_eq!(mehr.len(), 30);
        assert_eq!(esfand.len(), 29);
        assert_eq!(mehr[0].name, "1");
        assert!(mehr.iter().all(|p| (30..80).contains(&p.value) && p.color == "#2dd4bf"));
    }

    #[test]
    fn test_series_are_deterministic_per_period() {
        let chart = StressChart::new();
        assert_eq!(chart.series(), chart.series());
        assert_eq!(
            monthly_series(CalendarSelection::new(1402, 3).unwrap()),
            monthly_series(CalendarSelection::new(1402, 3).unwrap())
        );
    }

    #[test]
    fn test_navigation_by_view() {
        let mut chart = StressChart::new();
        chart.prev();
        assert_eq!(chart.period().year, 1402);
        chart.next();
        chart.next();
        assert_eq!(chart.period().year, 1404);

        chart.set_view(ChartView::Monthly);
        let mut chart_month = chart.clone();
        for _ in 0..6 {
            chart_month.next();
        }
        assert_eq!(chart_month.period(), CalendarSelection::new(1405, 0).unwrap());
        chart_month.prev();
        assert_eq!(chart_month.period(), CalendarSelection::new(1404, 11).unwrap());
        assert_eq!(chart_month.heading(), "اسفند");
    }

    #[test]
    fn test_picker_drives_period() {
        let mut chart = StressChart::new();
        chart.selection_mut().open_picker().pick_month(1);
        chart.selection_mut().confirm_picker();
        assert_eq!(chart.period().month_index, 1);
    }
}
