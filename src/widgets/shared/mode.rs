use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which sub-widgets the picker shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerMode {
    #[default]
    Date,
    Time,
    #[serde(rename = "datetime")]
    DateTime,
    #[serde(rename = "workingdays")]
    WorkingDays,
    #[serde(rename = "nodate")]
    NoDate,
}

impl PickerMode {
    pub const ALL: [Self; 5] = [
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::WorkingDays,
        Self::NoDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::WorkingDays => "workingdays",
            Self::NoDate => "nodate",
        }
    }

    /// Header and month grid.
    pub fn has_calendar(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    pub fn has_time(self) -> bool {
        matches!(self, Self::Time | Self::DateTime)
    }

    /// `workingdays` and `nodate` skip the grid and the selection entirely.
    pub fn uses_selection(self) -> bool {
        !matches!(self, Self::WorkingDays | Self::NoDate)
    }
}

impl fmt::Display for PickerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|mode| mode.as_str()).collect();
                format!("unknown mode '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

/// Phone-class versus tablet-class presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Wheel panels for month/year and time.
    #[default]
    Compact,
    /// Inline month/year selectors and hour/minute text fields.
    Wide,
}
