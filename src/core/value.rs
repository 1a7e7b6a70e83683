use serde::Serialize;

use crate::widgets::shared::datetime::DateTime;

/// Values flowing out of widgets and, on confirm, out of the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    None,
    Date(DateTime),
    Range(DateTime, DateTime),
    Number(i64),
    Text(String),
}

impl Value {
    /// `Range` when an end was picked, `Date` otherwise.
    pub fn from_picked(picked: (DateTime, Option<DateTime>)) -> Self {
        match picked {
            (start, Some(end)) => Self::Range(start, end),
            (start, None) => Self::Date(start),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(day: u32, hour: u32) -> DateTime {
        DateTime::from_ymd_hm(2024, 1, day, hour, 0).expect("valid datetime")
    }

    #[test]
    fn picked_pair_maps_to_date_or_range() {
        assert_eq!(Value::from_picked((dt(15, 9), None)), Value::Date(dt(15, 9)));
        assert_eq!(
            Value::from_picked((dt(12, 9), Some(dt(18, 9)))),
            Value::Range(dt(12, 9), dt(18, 9))
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Value::Range(dt(12, 9), dt(18, 17))).expect("serialize");
        assert_eq!(json["kind"], "range");
        assert_eq!(json["value"][0], "2024-01-12T09:00");
        assert_eq!(json["value"][1], "2024-01-18T17:00");

        let json = serde_json::to_value(Value::Number(10)).expect("serialize");
        assert_eq!(json, serde_json::json!({"kind": "number", "value": 10}));
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Number(3).as_number(), Some(3));
        assert_eq!(Value::Date(dt(1, 0)).as_date(), Some(dt(1, 0)));
        assert_eq!(Value::Text("x".into()).as_text(), Some("x"));
        assert!(Value::None.is_empty());
        assert!(!Value::Number(0).is_empty());
    }
}
