//! Picker configuration, loaded from YAML or JSON or built in code.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::{PickerError, Result};
use crate::ui::style::Color;
use crate::ui::theme::Theme;
use crate::widgets::components::segmented::TabAction;
use crate::widgets::shared::bounds::{Bounds, MinuteInterval};
use crate::widgets::shared::datetime::DateTime;
use crate::widgets::shared::locale::Language;
use crate::widgets::shared::mode::{Layout, PickerMode};

pub const DEFAULT_WORKING_DAYS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PickerConfig {
    /// Initial start. Defaults to now.
    pub date: Option<DateTime>,
    /// Initial end, used only with `with_end_date`.
    pub end_date: Option<DateTime>,
    pub mode: PickerMode,
    pub minimum_date: Option<DateTime>,
    pub maximum_date: Option<DateTime>,
    pub minute_interval: Option<u32>,
    /// Forces a one-minute interval.
    pub no_interval: bool,
    pub with_end_date: bool,
    pub use_year_input: bool,
    pub language: Language,
    pub dark_mode: bool,
    /// `#RRGGBB` accent.
    pub main_color: Option<String>,
    pub actions: Vec<TabAction>,
    pub selected: Option<usize>,
    pub working_days: u64,
    pub layout: Layout,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            date: None,
            end_date: None,
            mode: PickerMode::default(),
            minimum_date: None,
            maximum_date: None,
            minute_interval: None,
            no_interval: false,
            with_end_date: false,
            use_year_input: false,
            language: Language::default(),
            dark_mode: false,
            main_color: None,
            actions: Vec::new(),
            selected: None,
            working_days: DEFAULT_WORKING_DAYS,
            layout: Layout::default(),
        }
    }
}

impl PickerConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a config file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content = fs::read_to_string(path)?;
        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            _ => Err(PickerError::UnsupportedConfigFormat(path.display().to_string())),
        }
    }

    /// Checks everything the picker would otherwise refuse at open time.
    pub fn validate(&self) -> Result<()> {
        self.bounds()?;
        self.interval()?;
        Ok(())
    }

    pub fn bounds(&self) -> Result<Bounds> {
        let fallback = Bounds::fallback();
        Bounds::new(
            self.minimum_date.unwrap_or(fallback.minimum()),
            self.maximum_date.unwrap_or(fallback.maximum()),
        )
    }

    pub fn interval(&self) -> Result<MinuteInterval> {
        if self.no_interval {
            return Ok(MinuteInterval::ONE);
        }
        match self.minute_interval {
            Some(minutes) => MinuteInterval::new(minutes),
            None => Ok(MinuteInterval::default()),
        }
    }

    /// The mode of the initially selected tab, else the configured mode.
    pub fn initial_mode(&self) -> PickerMode {
        self.selected
            .and_then(|index| self.actions.get(index))
            .map(|tab| tab.mode)
            .unwrap_or(self.mode)
    }

    pub fn theme(&self) -> Theme {
        let accent = self.main_color.as_deref().and_then(|hex| {
            let color = Color::from_hex(hex);
            if color.is_none() {
                warn!(main_color = hex, "ignoring malformed accent colour");
            }
            color
        });
        Theme::new(self.dark_mode, accent)
    }

    // ── Builders ──────────────────────────────────────────────────────────────

    pub fn with_mode(mut self, mode: PickerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_range(mut self, enabled: bool) -> Self {
        self.with_end_date = enabled;
        self
    }

    pub fn with_date(mut self, date: DateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_end(mut self, end: DateTime) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_bounds(mut self, minimum: DateTime, maximum: DateTime) -> Self {
        self.minimum_date = Some(minimum);
        self.maximum_date = Some(maximum);
        self
    }

    pub fn with_minute_interval(mut self, minutes: u32) -> Self {
        self.minute_interval = Some(minutes);
        self
    }

    pub fn with_no_interval(mut self, enabled: bool) -> Self {
        self.no_interval = enabled;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_dark_mode(mut self, dark: bool) -> Self {
        self.dark_mode = dark;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_year_input(mut self, enabled: bool) -> Self {
        self.use_year_input = enabled;
        self
    }

    pub fn with_actions(mut self, actions: Vec<TabAction>, selected: Option<usize>) -> Self {
        self.actions = actions;
        self.selected = selected;
        self
    }

    pub fn with_working_days(mut self, days: u64) -> Self {
        self.working_days = days;
        self
    }
}
