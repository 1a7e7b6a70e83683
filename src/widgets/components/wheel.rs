use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine, centered};
use crate::widgets::base::InputBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};

const VISIBLE_ROWS: usize = 5;
const PAGE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelItem {
    pub value: i64,
    pub label: String,
}

impl WheelItem {
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }

    /// Zero-padded two-digit label, used for hours and minutes.
    pub fn padded(value: u32) -> Self {
        Self::new(value.into(), format!("{:02}", value))
    }
}

/// A scrolling single-column option list. The owner refreshes the options
/// whenever the allowed values change.
pub struct Wheel {
    base: InputBase,
    items: Vec<WheelItem>,
    selected: usize,
    width: usize,
}

impl Wheel {
    pub fn new(id: impl Into<String>, width: usize) -> Self {
        Self {
            base: InputBase::new(id, ""),
            items: Vec::new(),
            selected: 0,
            width,
        }
    }

    pub fn items(&self) -> &[WheelItem] {
        &self.items
    }

    pub fn selected_value(&self) -> Option<i64> {
        self.items.get(self.selected).map(|item| item.value)
    }

    pub fn selected_label(&self) -> &str {
        self.items
            .get(self.selected)
            .map(|item| item.label.as_str())
            .unwrap_or("")
    }

    /// Replaces the options and selects `value`, or the closest option above
    /// it, or the last one.
    pub fn set_items(&mut self, items: Vec<WheelItem>, value: i64) {
        self.selected = items
            .iter()
            .position(|item| item.value >= value)
            .unwrap_or(items.len().saturating_sub(1));
        self.items = items;
    }

    fn move_by(&mut self, delta: isize) -> InteractionResult {
        if self.items.is_empty() {
            return InteractionResult::ignored();
        }
        let last = self.items.len() - 1;
        let next = self.selected.saturating_add_signed(delta).min(last);
        if next == self.selected {
            return InteractionResult::consumed();
        }
        self.selected = next;
        let value = self.items[next].value;
        InteractionResult::changed(self.base.id(), Value::Number(value))
    }

    /// One-line form: `‹ March ›`.
    pub fn inline_spans(&self, ctx: &RenderContext) -> SpanLine {
        let focused = self.base.is_focused(ctx);
        let arrow = ctx.theme.secondary();
        vec![
            Span::styled("‹ ", arrow).no_wrap(),
            Span::styled(
                centered(self.selected_label(), self.width),
                ctx.theme.field(focused),
            )
            .no_wrap(),
            Span::styled(" ›", arrow).no_wrap(),
        ]
    }
}

impl Drawable for Wheel {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let half = VISIBLE_ROWS / 2;
        let mut lines = Vec::with_capacity(VISIBLE_ROWS);
        for row in 0..VISIBLE_ROWS {
            let index = (self.selected + row).checked_sub(half);
            let item = index.and_then(|index| self.items.get(index));
            let text = item.map(|item| item.label.as_str()).unwrap_or("");
            let line = if row == half {
                let style = if focused {
                    ctx.theme.focused()
                } else {
                    ctx.theme.accent().bold()
                };
                vec![
                    Span::styled("›", ctx.theme.accent()).no_wrap(),
                    Span::styled(centered(text, self.width), style).no_wrap(),
                    Span::styled("‹", ctx.theme.accent()).no_wrap(),
                ]
            } else {
                vec![Span::styled(format!(" {} ", centered(text, self.width)), ctx.theme.muted())
                    .no_wrap()]
            };
            lines.push(line);
        }
        DrawOutput { lines }
    }
}

impl Interactive for Wheel {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE as isize)),
            KeyCode::PageDown => self.move_by(PAGE as isize),
            KeyCode::Home => self.move_by(isize::MIN / 2),
            KeyCode::End => self.move_by(isize::MAX / 2),
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        self.selected_value().map(Value::Number)
    }

    fn set_value(&mut self, value: Value) {
        if let Some(target) = value.as_number()
            && let Some(index) = self.items.iter().position(|item| item.value == target)
        {
            self.selected = index;
        }
    }
}
