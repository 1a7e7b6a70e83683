use crate::core::value::Value;
use crate::runtime::event::{PickerAction, SystemEvent, ValueChange, WidgetAction};
use crate::runtime::scheduler::SchedulerCommand;
use crate::terminal::{CursorPos, KeyEvent, TerminalSize};
use crate::ui::span::SpanLine;
use crate::ui::theme::Theme;
use crate::widgets::shared::locale::Language;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Does not participate in focus cycling.
    None,
    /// A single focusable leaf (text field, wheel, button row, …).
    Leaf,
    /// Manages focus internally among its parts.
    Group,
}

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub focused_id: Option<String>,
    pub terminal_size: TerminalSize,
    pub theme: Theme,
    pub language: Language,
}

impl RenderContext {
    pub fn new(terminal_size: TerminalSize, theme: Theme, language: Language) -> Self {
        Self {
            focused_id: None,
            terminal_size,
            theme,
            language,
        }
    }

    pub fn with_focus(&self, focused_id: Option<&str>) -> Self {
        Self {
            focused_id: focused_id.map(str::to_string),
            ..self.clone()
        }
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_id.as_deref() == Some(id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

impl DrawOutput {
    pub fn single(line: SpanLine) -> Self {
        Self { lines: vec![line] }
    }

    pub fn extend(&mut self, other: DrawOutput) {
        self.lines.extend(other.lines);
    }
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

pub trait Drawable: Send {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: false,
            actions: Vec::new(),
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn input_done() -> Self {
        Self::with_action(WidgetAction::InputDone)
    }

    pub fn changed(target: &str, value: Value) -> Self {
        Self::with_action(WidgetAction::ValueChanged {
            change: ValueChange::new(target, value),
        })
    }

    pub fn push(&mut self, action: WidgetAction) {
        self.handled = true;
        self.request_render = true;
        self.actions.push(action);
    }

    pub fn push_picker(&mut self, action: PickerAction) {
        self.push(WidgetAction::Picker(action));
    }

    pub fn push_schedule(&mut self, command: SchedulerCommand) {
        self.handled = true;
        self.actions.push(WidgetAction::Schedule(command));
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.actions.extend(other.actions);
    }

    /// The last value change reported by the widget, if any.
    pub fn last_change(&self) -> Option<&ValueChange> {
        self.actions.iter().rev().find_map(|action| match action {
            WidgetAction::ValueChanged { change } => Some(change),
            _ => None,
        })
    }

    pub fn focus_request(&self) -> Option<&str> {
        self.actions.iter().rev().find_map(|action| match action {
            WidgetAction::RequestFocus { target } => Some(target.as_str()),
            _ => None,
        })
    }

    pub fn is_input_done(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, WidgetAction::InputDone))
    }

    pub fn picker_actions(&self) -> impl Iterator<Item = &PickerAction> + '_ {
        self.actions.iter().filter_map(|action| match action {
            WidgetAction::Picker(action) => Some(action),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub trait Interactive: Send {
    fn focus_mode(&self) -> FocusMode;

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    /// Called when focus moves onto the widget.
    fn on_focus(&mut self) {}

    fn on_system_event(&mut self, _event: &SystemEvent) -> InteractionResult {
        InteractionResult::ignored()
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }

    fn value(&self) -> Option<Value> {
        None
    }

    fn set_value(&mut self, _value: Value) {}
}
