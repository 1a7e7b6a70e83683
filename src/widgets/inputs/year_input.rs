use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::InputBase;
use crate::widgets::inputs::text_edit;
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};

const MAX_DIGITS: usize = 4;

/// Free-form year entry. Any 1-4 digit value commits immediately; range
/// checks happen when the field loses focus.
pub struct YearInput {
    base: InputBase,
    text: String,
    replace_on_type: bool,
}

impl YearInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            text: String::new(),
            replace_on_type: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sync(&mut self, year: i32) {
        self.text = year.to_string();
    }

    pub fn year(&self) -> Option<i32> {
        if self.text.is_empty() || self.text.len() > MAX_DIGITS {
            return None;
        }
        self.text.parse().ok()
    }

    fn commit(&self) -> InteractionResult {
        match self.year() {
            Some(year) => InteractionResult::changed(self.base.id(), Value::Number(year.into())),
            None => InteractionResult::handled(),
        }
    }
}

impl Drawable for YearInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let text = text_edit::field_text(&self.text, focused, MAX_DIGITS + 1);
        DrawOutput::single(vec![
            Span::styled(text, ctx.theme.field(focused)).no_wrap(),
        ])
    }
}

impl Interactive for YearInput {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_focus(&mut self) {
        self.replace_on_type = true;
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if self.replace_on_type {
                    self.replace_on_type = false;
                    self.text.clear();
                }
                if !text_edit::push_digit(&mut self.text, ch, MAX_DIGITS) {
                    return InteractionResult::consumed();
                }
                self.commit()
            }
            KeyCode::Char(_) => InteractionResult::consumed(),
            KeyCode::Backspace => {
                self.replace_on_type = false;
                if !text_edit::pop_char(&mut self.text) {
                    return InteractionResult::consumed();
                }
                self.commit()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        self.year().map(|year| Value::Number(year.into()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(year) = value.as_number().and_then(|n| i32::try_from(n).ok()) {
            self.sync(year);
        }
    }
}
