use crate::core::value::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::InputBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Hour,
    Minute,
}

impl TimeUnit {
    pub fn max(self) -> u32 {
        match self {
            Self::Hour => 23,
            Self::Minute => 59,
        }
    }
}

/// Two-digit hour or minute field. A value above the unit's maximum is
/// rejected outright; an hour above 2 cannot take a second digit, so focus
/// moves on to the paired minute field.
pub struct TimeText {
    base: InputBase,
    unit: TimeUnit,
    value: u32,
    /// Digits typed since focus, at most two.
    typed: String,
    next_field: Option<String>,
}

impl TimeText {
    pub fn new(id: impl Into<String>, unit: TimeUnit) -> Self {
        Self {
            base: InputBase::new(id, ""),
            unit,
            value: 0,
            typed: String::new(),
            next_field: None,
        }
    }

    pub fn with_next_field(mut self, id: impl Into<String>) -> Self {
        self.next_field = Some(id.into());
        self
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn current(&self) -> u32 {
        self.value
    }

    pub fn sync(&mut self, value: u32) {
        self.value = value.min(self.unit.max());
    }

    fn accept(&mut self, candidate: &str) -> InteractionResult {
        let Ok(parsed) = candidate.parse::<u32>() else {
            return InteractionResult::consumed();
        };
        if parsed > self.unit.max() {
            return InteractionResult::consumed();
        }
        self.value = parsed;
        self.typed = candidate.to_string();

        let mut result = InteractionResult::changed(self.base.id(), Value::Number(parsed.into()));
        if self.unit == TimeUnit::Hour
            && parsed > 2
            && let Some(next) = &self.next_field
        {
            result.push(WidgetAction::RequestFocus {
                target: next.clone(),
            });
        }
        result
    }
}

impl Drawable for TimeText {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        DrawOutput::single(vec![
            Span::styled(format!("{:02}", self.value), ctx.theme.field(focused)).no_wrap(),
        ])
    }
}

impl Interactive for TimeText {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_focus(&mut self) {
        self.typed.clear();
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                let candidate = match self.typed.chars().last() {
                    Some(last) => format!("{}{}", last, ch),
                    None => ch.to_string(),
                };
                self.accept(&candidate)
            }
            KeyCode::Char(_) => InteractionResult::consumed(),
            KeyCode::Backspace => {
                let tens = (self.value / 10).to_string();
                let result = self.accept(&tens);
                self.typed.clear();
                result
            }
            KeyCode::Up => {
                let next = if self.value >= self.unit.max() { 0 } else { self.value + 1 };
                self.typed.clear();
                self.accept(&next.to_string())
            }
            KeyCode::Down => {
                let next = if self.value == 0 { self.unit.max() } else { self.value - 1 };
                self.typed.clear();
                self.accept(&next.to_string())
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Number(self.value.into()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(n) = value.as_number().and_then(|n| u32::try_from(n).ok()) {
            self.sync(n);
        }
    }
}
