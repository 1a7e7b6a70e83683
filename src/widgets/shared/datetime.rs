use std::fmt;

use chrono::{
    Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PickerError;

// ── Formats ───────────────────────────────────────────────────────────────────

pub mod fmt_keys {
    pub const DAY: &str = "%d.%m.%Y";
    pub const TIME: &str = "%H:%M";
    pub const MONTH: &str = "%m.%Y";
    pub const ISO_MINUTES: &str = "%Y-%m-%dT%H:%M";
}

const ACCEPTED_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

// ── Field / Unit ──────────────────────────────────────────────────────────────

/// A single calendar or clock component. Months are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year(i32),
    Month(u32),
    Day(u32),
    Hour(u32),
    Minute(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

// ── DateTime ──────────────────────────────────────────────────────────────────

/// Minute-granularity local timestamp. Seconds are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(NaiveDateTime);

impl DateTime {
    pub fn from_naive(value: NaiveDateTime) -> Self {
        let time =
            NaiveTime::from_hms_opt(value.hour(), value.minute(), 0).unwrap_or(NaiveTime::MIN);
        Self(value.date().and_time(time))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }

    pub fn from_ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(Self(date.and_time(time)))
    }

    pub fn now() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    /// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DDTHH:MM:SS`.
    pub fn parse(text: &str) -> Result<Self, PickerError> {
        let text = text.trim();
        for format in ACCEPTED_FORMATS {
            if let Ok(value) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(Self::from_naive(value));
            }
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|_| PickerError::InvalidDate(text.to_string()))
    }

    pub fn naive(self) -> NaiveDateTime {
        self.0
    }

    pub fn date(self) -> NaiveDate {
        self.0.date()
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Sets one component. Out-of-range days are clamped to the month's
    /// length; a year chrono cannot represent leaves the value unchanged.
    pub fn set(self, field: Field) -> Self {
        match field {
            Field::Year(year) => self.with_date_parts(year, self.month(), self.day()),
            Field::Month(month) => self.with_date_parts(self.year(), month, self.day()),
            Field::Day(day) => self.with_date_parts(self.year(), self.month(), day),
            Field::Hour(hour) => self.with_time(hour, self.minute()),
            Field::Minute(minute) => self.with_time(self.hour(), minute),
        }
    }

    pub fn with_date_parts(self, year: i32, month: u32, day: u32) -> Self {
        let month = month.clamp(1, 12);
        let day = day.clamp(1, days_in_month(year, month));
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Self(date.and_time(self.0.time())),
            None => self,
        }
    }

    pub fn with_date_of(self, other: Self) -> Self {
        Self(other.date().and_time(self.0.time()))
    }

    pub fn with_time(self, hour: u32, minute: u32) -> Self {
        match NaiveTime::from_hms_opt(hour.min(23), minute.min(59), 0) {
            Some(time) => Self(self.date().and_time(time)),
            None => self,
        }
    }

    pub fn with_time_of(self, other: Self) -> Self {
        self.with_time(other.hour(), other.minute())
    }

    /// Adds `amount` units. Month and year steps clamp the day to the target
    /// month; overflow past chrono's range leaves the value unchanged.
    pub fn add(self, unit: Unit, amount: i64) -> Self {
        let shifted = match unit {
            Unit::Minute => {
                Duration::try_minutes(amount).and_then(|d| self.0.checked_add_signed(d))
            }
            Unit::Hour => Duration::try_hours(amount).and_then(|d| self.0.checked_add_signed(d)),
            Unit::Day => Duration::try_days(amount).and_then(|d| self.0.checked_add_signed(d)),
            Unit::Month => add_months(self.0, amount),
            Unit::Year => amount
                .checked_mul(12)
                .and_then(|months| add_months(self.0, months)),
        };
        shifted.map(Self).unwrap_or(self)
    }

    pub fn start_of_day(self) -> Self {
        Self(self.date().and_time(NaiveTime::MIN))
    }

    /// Last minute of the day.
    pub fn end_of_day(self) -> Self {
        self.with_time(23, 59)
    }

    pub fn start_of_month(self) -> Self {
        self.with_date_parts(self.year(), self.month(), 1).start_of_day()
    }

    pub fn end_of_month(self) -> Self {
        self.with_date_parts(self.year(), self.month(), days_in_month(self.year(), self.month()))
            .end_of_day()
    }

    /// `DD.MM.YYYY`, used for same-day comparisons and the date text field.
    pub fn day_key(self) -> String {
        self.0.format(fmt_keys::DAY).to_string()
    }

    /// `HH:mm`.
    pub fn time_key(self) -> String {
        self.0.format(fmt_keys::TIME).to_string()
    }

    /// `MM.YYYY`.
    pub fn month_key(self) -> String {
        self.0.format(fmt_keys::MONTH).to_string()
    }

    pub fn same_day(self, other: Self) -> bool {
        self.date() == other.date()
    }

    pub fn same_month(self, other: Self) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }
}

fn add_months(value: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount >= 0 {
        value.checked_add_months(months)
    } else {
        value.checked_sub_months(months)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M"))
    }
}

impl From<NaiveDate> for DateTime {
    fn from(value: NaiveDate) -> Self {
        Self::from_date(value)
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(value: NaiveDateTime) -> Self {
        Self::from_naive(value)
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.format(fmt_keys::ISO_MINUTES).to_string())
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

// ── Month arithmetic ──────────────────────────────────────────────────────────

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}
