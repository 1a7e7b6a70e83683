use serde::Deserialize;
use tracing::debug;

use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::InputBase;
use crate::widgets::shared::mode::PickerMode;
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};

/// One tab: a caption and the picker mode it switches to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TabAction {
    pub text: String,
    pub mode: PickerMode,
}

impl TabAction {
    pub fn new(text: impl Into<String>, mode: PickerMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }
}

/// Result of pressing a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabChange {
    Selected(usize),
    Deselected,
}

/// Segmented tab strip. Pressing the selected tab clears the selection.
pub struct SegmentedControl {
    base: InputBase,
    tabs: Vec<TabAction>,
    selected: Option<usize>,
    cursor: usize,
}

impl SegmentedControl {
    pub fn new(id: impl Into<String>, tabs: Vec<TabAction>, selected: Option<usize>) -> Self {
        let selected = selected.filter(|index| *index < tabs.len());
        Self {
            base: InputBase::new(id, ""),
            tabs,
            selected,
            cursor: selected.unwrap_or(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[TabAction] {
        &self.tabs
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_tab(&self) -> Option<&TabAction> {
        self.selected.and_then(|index| self.tabs.get(index))
    }

    pub fn press(&mut self, index: usize) -> Option<TabChange> {
        if index >= self.tabs.len() {
            return None;
        }
        self.cursor = index;
        let change = if self.selected == Some(index) {
            self.selected = None;
            TabChange::Deselected
        } else {
            self.selected = Some(index);
            TabChange::Selected(index)
        };
        debug!(tab = index, ?change, "tab pressed");
        Some(change)
    }
}

impl Drawable for SegmentedControl {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let theme = &ctx.theme;
        let mut spans = Vec::new();
        for (index, tab) in self.tabs.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled("│", theme.border()).no_wrap());
            }
            let mut style = if self.selected == Some(index) {
                theme.accent().bold()
            } else {
                theme.secondary()
            };
            if focused && self.cursor == index {
                style = style.underline();
            }
            spans.push(Span::styled(format!(" {} ", tab.text), style).no_wrap());
        }
        DrawOutput::single(spans)
    }
}

impl Interactive for SegmentedControl {
    fn focus_mode(&self) -> FocusMode {
        if self.tabs.is_empty() {
            FocusMode::None
        } else {
            FocusMode::Leaf
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.tabs.is_empty() {
            return InteractionResult::ignored();
        }
        match key.code {
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InteractionResult::handled()
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.tabs.len() - 1);
                InteractionResult::handled()
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.press(self.cursor) {
                Some(TabChange::Selected(index)) => {
                    InteractionResult::changed(self.base.id(), Value::Number(index as i64))
                }
                Some(TabChange::Deselected) => {
                    InteractionResult::changed(self.base.id(), Value::None)
                }
                None => InteractionResult::ignored(),
            },
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        self.selected.map(|index| Value::Number(index as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> Vec<TabAction> {
        vec![
            TabAction::new("Date", PickerMode::Date),
            TabAction::new("Deadline", PickerMode::WorkingDays),
        ]
    }

    #[test]
    fn pressing_selected_tab_deselects() {
        let mut control = SegmentedControl::new("tabs", tabs(), Some(1));
        assert_eq!(control.press(1), Some(TabChange::Deselected));
        assert_eq!(control.selected(), None);
        assert_eq!(control.press(0), Some(TabChange::Selected(0)));
        assert_eq!(control.selected_tab().map(|tab| tab.mode), Some(PickerMode::Date));
        assert_eq!(control.press(5), None);
    }

    #[test]
    fn out_of_range_initial_selection_is_dropped() {
        let control = SegmentedControl::new("tabs", tabs(), Some(7));
        assert_eq!(control.selected(), None);
    }

    #[test]
    fn keys_move_cursor_and_press() {
        let mut control = SegmentedControl::new("tabs", tabs(), None);
        control.on_key(KeyEvent::new(KeyCode::Right));
        let result = control.on_key(KeyEvent::new(KeyCode::Enter));
        assert_eq!(
            result.last_change().map(|change| change.value.clone()),
            Some(Value::Number(1))
        );
        let result = control.on_key(KeyEvent::new(KeyCode::Char(' ')));
        assert_eq!(
            result.last_change().map(|change| change.value.clone()),
            Some(Value::None)
        );
    }

    #[test]
    fn empty_strip_is_not_focusable() {
        let control = SegmentedControl::new("tabs", Vec::new(), None);
        assert_eq!(control.focus_mode(), FocusMode::None);
        assert!(control.is_empty());
    }
}
