use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_RU: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

// Sunday-first, as the calendar buckets are built.
const WEEKDAYS_EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAYS_RU: [&str; 7] = ["Вс", "Пн", "Вт", "Ср", "Чт", "Пт", "Сб"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Time,
    SelectMonth,
    SelectYear,
    Select,
    Beginning,
    End,
    Ok,
    Cancel,
}

impl Language {
    /// 1-based month.
    pub fn month_name(self, month: u32) -> &'static str {
        let index = (month as usize).saturating_sub(1) % 12;
        match self {
            Self::En => MONTHS_EN[index],
            Self::Ru => MONTHS_RU[index],
        }
    }

    /// Weekday header for a Monday-first column.
    pub fn weekday_short(self, column: usize) -> &'static str {
        let names = match self {
            Self::En => &WEEKDAYS_EN,
            Self::Ru => &WEEKDAYS_RU,
        };
        names[(column + 1) % 7]
    }

    pub fn label(self, label: Label) -> &'static str {
        match (self, label) {
            (Self::En, Label::Time) => "Time",
            (Self::En, Label::SelectMonth) => "Select Month",
            (Self::En, Label::SelectYear) => "Select Year",
            (Self::En, Label::Select) => "Select",
            (Self::En, Label::Beginning) => "beginning",
            (Self::En, Label::End) => "end",
            (Self::En, Label::Ok) => "OK",
            (Self::En, Label::Cancel) => "Cancel",
            (Self::Ru, Label::Time) => "Время",
            (Self::Ru, Label::SelectMonth) => "Выберите месяц",
            (Self::Ru, Label::SelectYear) => "Выберите год",
            (Self::Ru, Label::Select) => "Выбрать",
            (Self::Ru, Label::Beginning) => "начало",
            (Self::Ru, Label::End) => "окончание",
            (Self::Ru, Label::Ok) => "OK",
            (Self::Ru, Label::Cancel) => "Отмена",
        }
    }

    pub fn working_days(self, count: u64) -> &'static str {
        match self {
            Self::En => {
                if count == 1 {
                    "working day"
                } else {
                    "working days"
                }
            }
            Self::Ru => ["рабочий день", "рабочих дня", "рабочих дней"][russian_plural(count)],
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            other => Err(format!("unknown language '{}', expected en or ru", other)),
        }
    }
}

/// Index into a `[one, few, many]` Russian plural table.
pub fn russian_plural(count: u64) -> usize {
    let tens = count % 100;
    match count % 10 {
        1 if tens != 11 => 0,
        2..=4 if !(10..20).contains(&tens) => 1,
        _ => 2,
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_headers_start_on_monday() {
        assert_eq!(Language::En.weekday_short(0), "Mon");
        assert_eq!(Language::En.weekday_short(6), "Sun");
        assert_eq!(Language::Ru.weekday_short(5), "Сб");
    }

    #[test]
    fn russian_plural_forms() {
        assert_eq!(Language::Ru.working_days(1), "рабочий день");
        assert_eq!(Language::Ru.working_days(3), "рабочих дня");
        assert_eq!(Language::Ru.working_days(11), "рабочих дней");
        assert_eq!(Language::Ru.working_days(12), "рабочих дней");
        assert_eq!(Language::Ru.working_days(21), "рабочий день");
        assert_eq!(Language::Ru.working_days(104), "рабочих дня");
    }

    #[test]
    fn english_plural_forms() {
        assert_eq!(Language::En.working_days(1), "working day");
        assert_eq!(Language::En.working_days(21), "working days");
        assert_eq!(Language::En.working_days(0), "working days");
    }

    #[test]
    fn month_names_and_capitalize() {
        assert_eq!(Language::En.month_name(3), "March");
        assert_eq!(Language::Ru.month_name(12), "Декабрь");
        assert_eq!(capitalize("март"), "Март");
        assert_eq!(capitalize(""), "");
    }
}
