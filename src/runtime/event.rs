use serde::Serialize;

use crate::core::value::Value;
use crate::runtime::scheduler::SchedulerCommand;
use crate::terminal::TerminalEvent;
use crate::widgets::shared::selection::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    pub target: String,
    pub value: Value,
}

impl ValueChange {
    pub fn new(target: impl Into<String>, value: Value) -> Self {
        Self {
            target: target.into(),
            value,
        }
    }
}

/// Where a confirmed value is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmTarget {
    Host,
    /// The tab selected in the segmented control.
    Tab(usize),
}

/// Every way the picker can close. All of them go through `hide_picker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    Confirm,
    Cancel,
    Backdrop,
    Back,
    Programmatic,
    Misconfigured,
}

/// Host-facing notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    ValueChanged(Value),
    Confirmed { target: ConfirmTarget, value: Value },
    Cancelled,
    Closed { reason: CloseReason },
}

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to their owner and finally the runtime.
#[derive(Debug, Clone)]
pub enum WidgetAction {
    ValueChanged { change: ValueChange },
    /// Widget signals it is done with its value (Enter).
    InputDone,
    RequestFocus { target: String },
    Picker(PickerAction),
    Schedule(SchedulerCommand),
}

/// Events dispatched by the runtime down to the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemEvent {
    /// Fires shortly after a field of `side` lost focus; closes that side's
    /// time panel unless one of its fields took focus again.
    BlurCheck { side: Side },
    RequestClose { reason: CloseReason },
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Terminal(TerminalEvent),
    System(SystemEvent),
}
