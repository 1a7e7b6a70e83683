use crate::error::PickerError;
use crate::widgets::shared::datetime::{DateTime, Unit};

pub const ALLOWED_MINUTE_INTERVALS: [u32; 11] = [1, 2, 3, 4, 5, 6, 10, 12, 15, 20, 30];
pub const DEFAULT_MINUTE_INTERVAL: u32 = 5;

// ── MinuteInterval ────────────────────────────────────────────────────────────

/// Granularity of time-of-day selections. Always divides an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteInterval(u32);

impl MinuteInterval {
    pub const ONE: Self = Self(1);

    pub fn new(minutes: u32) -> Result<Self, PickerError> {
        if ALLOWED_MINUTE_INTERVALS.contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(PickerError::InvalidMinuteInterval(minutes))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for MinuteInterval {
    fn default() -> Self {
        Self(DEFAULT_MINUTE_INTERVAL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Up,
    Down,
}

/// Rounds a minute value to a multiple of `interval`. Rounding up may yield
/// 60, which callers carry into the next hour.
pub fn round_minutes(minute: u32, interval: MinuteInterval, rounding: Rounding) -> u32 {
    let step = interval.get();
    let remainder = minute % step;
    let floor = minute - remainder;
    if remainder != 0 && rounding == Rounding::Up {
        floor + step
    } else {
        floor
    }
}

/// Replaces the minute of `value` by its rounded form, carrying into the hour.
pub fn snap_minutes(value: DateTime, interval: MinuteInterval, rounding: Rounding) -> DateTime {
    let minute = round_minutes(value.minute(), interval, rounding);
    value
        .with_time(value.hour(), 0)
        .add(Unit::Minute, i64::from(minute))
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Inclusive selectable range. `minimum <= maximum` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    minimum: DateTime,
    maximum: DateTime,
}

impl Bounds {
    pub fn new(minimum: DateTime, maximum: DateTime) -> Result<Self, PickerError> {
        if minimum > maximum {
            return Err(PickerError::InvertedBounds { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    /// 1900-01-01 00:00 through 2100-01-01 00:00.
    pub fn fallback() -> Self {
        Self {
            minimum: fallback_minimum(),
            maximum: fallback_maximum(),
        }
    }

    pub fn minimum(&self) -> DateTime {
        self.minimum
    }

    pub fn maximum(&self) -> DateTime {
        self.maximum
    }

    pub fn contains(&self, value: DateTime) -> bool {
        self.minimum <= value && value <= self.maximum
    }

    /// Whether any minute of `day` lies inside the bounds.
    pub fn contains_day(&self, day: DateTime) -> bool {
        day.end_of_day() >= self.minimum && day.start_of_day() <= self.maximum
    }

    pub fn clamp(&self, value: DateTime) -> DateTime {
        value.clamp(self.minimum, self.maximum)
    }

    /// Moves only the calendar date of `value` onto the violated bound.
    pub fn clamp_date(&self, value: DateTime) -> DateTime {
        if value < self.minimum {
            value.with_date_of(self.minimum)
        } else if value > self.maximum {
            value.with_date_of(self.maximum)
        } else {
            value
        }
    }

    /// Clamps `value` into the bounds, snapping minutes to `interval`: up at
    /// the lower bound, down at the upper bound, and by `in_range` otherwise
    /// (`None` keeps in-range minutes untouched). The result is always inside
    /// the bounds even when no interval multiple is.
    pub fn snap(
        &self,
        value: DateTime,
        interval: MinuteInterval,
        in_range: Option<Rounding>,
    ) -> DateTime {
        let snapped = if value < self.minimum {
            snap_minutes(self.minimum, interval, Rounding::Up)
        } else if value > self.maximum {
            snap_minutes(self.maximum, interval, Rounding::Down)
        } else if let Some(rounding) = in_range {
            snap_minutes(value, interval, rounding)
        } else {
            value
        };
        self.clamp(snapped)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::fallback()
    }
}

fn fallback_minimum() -> DateTime {
    DateTime::from_ymd_hm(1900, 1, 1, 0, 0).unwrap_or_else(DateTime::now)
}

fn fallback_maximum() -> DateTime {
    DateTime::from_ymd_hm(2100, 1, 1, 0, 0).unwrap_or_else(DateTime::now)
}
