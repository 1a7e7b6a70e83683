use std::ops::RangeInclusive;

use crate::widgets::shared::bounds::Bounds;
use crate::widgets::shared::datetime::{DateTime, Unit};

pub const WEEKDAY_COUNT: usize = 7;

/// Saturday and Sunday in the Monday-first column order.
pub const WEEKEND_COLUMNS: [usize; 2] = [5, 6];

pub fn is_weekend_column(column: usize) -> bool {
    WEEKEND_COLUMNS.contains(&column)
}

// ── CalendarGrid ──────────────────────────────────────────────────────────────

/// One month laid out in seven Monday-first weekday columns. `None` cells are
/// padding: one leading cell in every column left of the 1st, and trailing
/// cells that make all columns the same height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    month: DateTime,
    columns: [Vec<Option<DateTime>>; WEEKDAY_COUNT],
}

pub fn build_grid(visible_month: DateTime, bounds: &Bounds) -> CalendarGrid {
    let month = bounds.clamp_date(visible_month);

    // Sunday-first buckets, as chrono numbers them from Sunday.
    let mut columns: [Vec<Option<DateTime>>; WEEKDAY_COUNT] = Default::default();
    let last = month.end_of_month();
    let mut day = month.start_of_month();
    while day <= last {
        columns[day.weekday().num_days_from_sunday() as usize].push(Some(day));
        let next = day.add(Unit::Day, 1);
        if next == day {
            break;
        }
        day = next;
    }
    columns.rotate_left(1);

    for column in columns.iter_mut().take(WEEKDAY_COUNT - 1) {
        let starts_with_first = matches!(column.first(), Some(Some(d)) if d.day() == 1);
        if starts_with_first {
            break;
        }
        column.insert(0, None);
    }

    let height = columns.iter().map(Vec::len).max().unwrap_or(0);
    for column in &mut columns {
        column.resize(height, None);
    }

    CalendarGrid { month, columns }
}

impl CalendarGrid {
    /// The visible month after clamping into the bounds.
    pub fn month(&self) -> DateTime {
        self.month
    }

    pub fn columns(&self) -> &[Vec<Option<DateTime>>; WEEKDAY_COUNT] {
        &self.columns
    }

    pub fn height(&self) -> usize {
        self.columns[0].len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<DateTime> {
        self.columns.get(column)?.get(row).copied().flatten()
    }

    pub fn row(&self, row: usize) -> [Option<DateTime>; WEEKDAY_COUNT] {
        std::array::from_fn(|column| self.cell(row, column))
    }

    pub fn rows(&self) -> impl Iterator<Item = [Option<DateTime>; WEEKDAY_COUNT]> + '_ {
        (0..self.height()).map(|row| self.row(row))
    }

    pub fn position_of(&self, day: DateTime) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(column, cells)| {
            cells
                .iter()
                .position(|cell| cell.is_some_and(|d| d.same_day(day)))
                .map(|row| (row, column))
        })
    }

    pub fn days(&self) -> impl Iterator<Item = DateTime> + '_ {
        self.columns.iter().flatten().filter_map(|cell| *cell)
    }
}

// ── Navigation & wheel options ────────────────────────────────────────────────

pub fn shift_month(visible: DateTime, delta: i64, bounds: &Bounds) -> DateTime {
    bounds.clamp_date(visible.add(Unit::Month, delta))
}

pub fn can_navigate_back(visible: DateTime, bounds: &Bounds) -> bool {
    visible.start_of_month() > bounds.minimum().start_of_month()
}

pub fn can_navigate_forward(visible: DateTime, bounds: &Bounds) -> bool {
    visible.start_of_month() < bounds.maximum().start_of_month()
}

/// Selectable months (1-based) of the visible year.
pub fn month_options(visible: DateTime, bounds: &Bounds) -> Vec<u32> {
    let minimum = bounds.minimum();
    let maximum = bounds.maximum();
    (1..=12)
        .filter(|month| {
            let before_min = visible.year() == minimum.year() && *month < minimum.month();
            let after_max = visible.year() == maximum.year() && *month > maximum.month();
            !(before_min || after_max)
        })
        .collect()
}

pub fn year_options(bounds: &Bounds) -> RangeInclusive<i32> {
    bounds.minimum().year()..=bounds.maximum().year()
}
