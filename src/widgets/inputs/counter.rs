use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::InputBase;
use crate::widgets::inputs::text_edit;
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};

const MAX_DIGITS: usize = 10;

/// Working-days counter: digits only, an empty field reads as zero.
pub struct Counter {
    base: InputBase,
    text: String,
    replace_on_type: bool,
}

impl Counter {
    pub fn new(id: impl Into<String>, initial: u64) -> Self {
        let mut counter = Self {
            base: InputBase::new(id, ""),
            text: String::new(),
            replace_on_type: false,
        };
        counter.sync(initial);
        counter
    }

    pub fn count(&self) -> u64 {
        self.text.parse().unwrap_or(0)
    }

    pub fn sync(&mut self, count: u64) {
        let text = count.to_string();
        self.text = text.chars().take(MAX_DIGITS).collect();
    }

    fn changed(&self) -> InteractionResult {
        let count = i64::try_from(self.count()).unwrap_or(i64::MAX);
        InteractionResult::changed(self.base.id(), Value::Number(count))
    }
}

impl Drawable for Counter {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let shown = if self.text.is_empty() { "0" } else { self.text.as_str() };
        let field = text_edit::field_text(shown, focused, 4);
        let label = ctx.language.working_days(self.count());
        DrawOutput::single(vec![
            Span::styled(field, ctx.theme.field(focused)).no_wrap(),
            Span::styled(format!(" {}", label), ctx.theme.plain()).no_wrap(),
        ])
    }
}

impl Interactive for Counter {
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
                self.changed()
            }
            KeyCode::Char(_) => InteractionResult::consumed(),
            KeyCode::Backspace => {
                self.replace_on_type = false;
                if !text_edit::pop_char(&mut self.text) {
                    return InteractionResult::consumed();
                }
                self.changed()
            }
            KeyCode::Up => {
                self.replace_on_type = false;
                self.sync(self.count().saturating_add(1));
                self.changed()
            }
            KeyCode::Down => {
                self.replace_on_type = false;
                self.sync(self.count().saturating_sub(1));
                self.changed()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        i64::try_from(self.count()).ok().map(Value::Number)
    }

    fn set_value(&mut self, value: Value) {
        if let Some(n) = value.as_number().and_then(|n| u64::try_from(n).ok()) {
            self.sync(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalSize;
    use crate::ui::theme::Theme;
    use crate::widgets::shared::locale::Language;

    fn press(counter: &mut Counter, code: KeyCode) -> InteractionResult {
        counter.on_key(KeyEvent::new(code))
    }

    #[test]
    fn typing_replaces_then_appends() {
        let mut counter = Counter::new("working_days", 10);
        counter.on_focus();
        press(&mut counter, KeyCode::Char('2'));
        press(&mut counter, KeyCode::Char('x'));
        let result = press(&mut counter, KeyCode::Char('1'));
        assert_eq!(counter.count(), 21);
        assert_eq!(
            result.last_change().map(|change| change.value.clone()),
            Some(Value::Number(21))
        );
    }

    #[test]
    fn empty_reads_as_zero() {
        let mut counter = Counter::new("working_days", 5);
        press(&mut counter, KeyCode::Backspace);
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.value(), Some(Value::Number(0)));
    }

    #[test]
    fn caps_at_ten_digits() {
        let mut counter = Counter::new("working_days", 0);
        counter.on_focus();
        for _ in 0..12 {
            press(&mut counter, KeyCode::Char('9'));
        }
        assert_eq!(counter.count(), 9_999_999_999);
    }

    #[test]
    fn label_follows_count() {
        let counter = Counter::new("working_days", 3);
        let ctx = RenderContext::new(
            TerminalSize {
                width: 80,
                height: 24,
            },
            Theme::default(),
            Language::Ru,
        );
        let out = counter.draw(&ctx);
        let text: String = out.lines[0].iter().map(|span| span.text.as_str()).collect();
        assert!(text.ends_with("рабочих дня"), "{text}");
    }
}
