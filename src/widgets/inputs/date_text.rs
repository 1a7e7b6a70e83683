//! `DD.MM.YYYY` text entry. Digits are typed freely, the dots appear as the
//! day and month fill up, and the value commits once all eight digits are in.

use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::InputBase;
use crate::widgets::inputs::text_edit;
use crate::widgets::shared::datetime::DateTime;
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};

const MAX_DIGITS: usize = 8;
const COMPLETE_LEN: usize = 10;
const DOT_POSITIONS: [usize; 2] = [2, 4];

/// Strips everything but digits, caps at eight digits and inserts the dots:
/// `"15032024"` becomes `"15.03.2024"`, `"150"` becomes `"15.0"`.
pub fn format_date_digits(raw: &str) -> String {
    let digits = text_edit::digits_only(raw);
    let mut out = String::with_capacity(COMPLETE_LEN);
    for (idx, ch) in digits.chars().take(MAX_DIGITS).enumerate() {
        if DOT_POSITIONS.contains(&idx) {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `(year, month, day)` of a complete `DD.MM.YYYY` text. Months outside
/// 1..=12 and day zero are rejected; a day past the month's end is left for
/// the caller to clamp.
pub fn parse_committed(text: &str) -> Option<(i32, u32, u32)> {
    if text.chars().count() != COMPLETE_LEN {
        return None;
    }
    let mut parts = text.split('.');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if day == 0 || !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month, day))
}

pub struct DateText {
    base: InputBase,
    text: String,
    /// Set on focus: the next digit replaces the whole text.
    replace_on_type: bool,
}

impl DateText {
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

    /// Mirrors a committed date back into the field.
    pub fn sync(&mut self, value: DateTime) {
        self.text = value.day_key();
    }

    pub fn committed(&self) -> Option<(i32, u32, u32)> {
        parse_committed(&self.text)
    }

    fn edit(&mut self, raw: String) -> InteractionResult {
        let formatted = format_date_digits(&raw);
        if formatted == self.text {
            return InteractionResult::consumed();
        }
        self.text = formatted;
        if self.committed().is_some() {
            return InteractionResult::changed(self.base.id(), Value::Text(self.text.clone()));
        }
        InteractionResult::handled()
    }
}

impl Drawable for DateText {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let text = text_edit::field_text(&self.text, focused, COMPLETE_LEN + 1);
        DrawOutput::single(vec![
            Span::styled(text, ctx.theme.field(focused)).no_wrap(),
        ])
    }
}

impl Interactive for DateText {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_focus(&mut self) {
        self.replace_on_type = true;
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                let raw = if self.replace_on_type {
                    ch.to_string()
                } else {
                    format!("{}{}", self.text, ch)
                };
                self.replace_on_type = false;
                self.edit(raw)
            }
            KeyCode::Char(_) => InteractionResult::consumed(),
            KeyCode::Backspace => {
                if self.replace_on_type {
                    self.replace_on_type = false;
                    return self.edit(String::new());
                }
                let mut digits = text_edit::digits_only(&self.text);
                if !text_edit::pop_char(&mut digits) {
                    return InteractionResult::consumed();
                }
                self.edit(digits)
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.text.clone()))
    }

    fn set_value(&mut self, value: Value) {
        match value {
            Value::Date(date) => self.sync(date),
            Value::Text(text) => self.text = format_date_digits(&text),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(input: &mut DateText, text: &str) -> Vec<InteractionResult> {
        text.chars()
            .map(|ch| input.on_key(KeyEvent::new(KeyCode::Char(ch))))
            .collect()
    }

    #[test]
    fn formats_progressively() {
        let steps: Vec<String> = (1..=8)
            .map(|n| format_date_digits(&"15032024"[..n]))
            .collect();
        assert_eq!(
            steps,
            vec![
                "1",
                "15",
                "15.0",
                "15.03",
                "15.03.2",
                "15.03.20",
                "15.03.202",
                "15.03.2024"
            ]
        );
    }

    #[test]
    fn strips_noise_and_caps_digits() {
        assert_eq!(format_date_digits("15/03/2024 extra 99"), "15.03.2024");
        assert_eq!(format_date_digits("ab"), "");
    }

    #[test]
    fn typing_full_date_commits_once() {
        let mut input = DateText::new("start_date", "Beginning");
        input.on_focus();
        let results = type_text(&mut input, "15032024");
        assert_eq!(input.text(), "15.03.2024");
        assert_eq!(input.committed(), Some((2024, 3, 15)));

        let commits = results
            .iter()
            .filter(|result| result.last_change().is_some())
            .count();
        assert_eq!(commits, 1);
        assert_eq!(
            results[7].last_change().map(|change| change.target.as_str()),
            Some("start_date")
        );
    }

    #[test]
    fn letters_are_discarded() {
        let mut input = DateText::new("start_date", "");
        type_text(&mut input, "1a5x");
        assert_eq!(input.text(), "15");
        assert_eq!(input.committed(), None);
    }

    #[test]
    fn focus_replaces_existing_text() {
        let mut input = DateText::new("start_date", "");
        input.sync(DateTime::from_ymd_hm(2024, 1, 10, 0, 0).expect("date"));
        assert_eq!(input.text(), "10.01.2024");
        input.on_focus();
        type_text(&mut input, "2");
        assert_eq!(input.text(), "2");
    }

    #[test]
    fn backspace_removes_digit_and_dangling_dot() {
        let mut input = DateText::new("start_date", "");
        type_text(&mut input, "150");
        assert_eq!(input.text(), "15.0");
        input.on_key(KeyEvent::new(KeyCode::Backspace));
        assert_eq!(input.text(), "15");
    }

    #[test]
    fn invalid_month_or_day_does_not_commit() {
        assert_eq!(parse_committed("15.13.2024"), None);
        assert_eq!(parse_committed("00.03.2024"), None);
        assert_eq!(parse_committed("31.02.2024"), Some((2024, 2, 31)));
        assert_eq!(parse_committed("15.03.202"), None);
    }
}
