use crate::core::value::Value;
use crate::error::Result;
use crate::runtime::effect::Effect;
use crate::runtime::event::{AppEvent, CloseReason, ConfirmTarget, PickerAction};
use crate::runtime::intent::Intent;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::Reducer;
use crate::runtime::scheduler::Scheduler;
use crate::terminal::{Terminal, TerminalEvent, TerminalSize};
use crate::ui::decorations::decorate_modal;
use crate::ui::frame::RenderFrame;
use crate::widgets::components::date_picker::DatePicker;
use crate::widgets::traits::{Drawable, Interactive};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const IDLE_POLL: Duration = Duration::from_millis(120);

/// How a picker session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Confirmed { target: ConfirmTarget, value: Value },
    Cancelled,
    Closed { reason: CloseReason },
}

/// Folds picker notifications into the session result.
#[derive(Debug, Default)]
pub struct Session {
    outcome: Option<Outcome>,
    closed: Option<CloseReason>,
    last_value: Option<Value>,
}

impl Session {
    pub fn record(&mut self, action: PickerAction) {
        match action {
            PickerAction::ValueChanged(value) => {
                debug!(?value, "value changed");
                self.last_value = Some(value);
            }
            PickerAction::Confirmed { target, value } => {
                self.outcome = Some(Outcome::Confirmed { target, value });
            }
            PickerAction::Cancelled => self.outcome = Some(Outcome::Cancelled),
            PickerAction::Closed { reason } => self.closed = Some(reason),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_some()
    }

    pub fn last_value(&self) -> Option<&Value> {
        self.last_value.as_ref()
    }

    pub fn finish(self) -> Outcome {
        match (self.outcome, self.closed) {
            (Some(outcome), _) => outcome,
            (None, Some(reason)) => Outcome::Closed { reason },
            (None, None) => Outcome::Closed {
                reason: CloseReason::Programmatic,
            },
        }
    }
}

/// Draws the picker inside the modal gutter.
pub fn compose_frame(picker: &DatePicker, size: TerminalSize) -> RenderFrame {
    let ctx = picker.render_context(size);
    let mut lines = picker.draw(&ctx).lines;
    let mut cursor = picker.cursor_pos();
    decorate_modal(&mut lines, &mut cursor, &ctx.theme);
    RenderFrame { lines, cursor }
}

pub struct Runtime {
    picker: DatePicker,
    terminal: Terminal,
    scheduler: Scheduler,
    key_bindings: KeyBindings,
    session: Session,
}

impl Runtime {
    pub fn new(picker: DatePicker, terminal: Terminal) -> Self {
        Self {
            picker,
            terminal,
            scheduler: Scheduler::new(),
            key_bindings: KeyBindings::new(),
            session: Session::default(),
        }
    }

    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    /// Opens the picker and runs until it closes.
    pub fn run(mut self) -> Result<Outcome> {
        self.terminal.enter()?;

        let run_result = (|| -> Result<()> {
            let effects = Reducer::open(&mut self.picker);
            self.apply_effects(effects)?;
            self.render()?;

            while !self.session.is_closed() {
                self.process_scheduled_events()?;
                if self.session.is_closed() {
                    break;
                }

                let now = Instant::now();
                let timeout = self.scheduler.poll_timeout(now, IDLE_POLL);
                let event = self.terminal.poll_event(timeout)?;

                self.dispatch_app_event(AppEvent::Terminal(event))?;
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result?;
        exit_result?;

        let outcome = self.session.finish();
        info!(?outcome, "picker session finished");
        Ok(outcome)
    }

    fn process_scheduled_events(&mut self) -> Result<()> {
        for event in self.scheduler.drain_ready(Instant::now()) {
            self.dispatch_app_event(event)?;
        }
        Ok(())
    }

    fn dispatch_app_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Terminal(TerminalEvent::Resize(_)) => self.render(),
            AppEvent::Terminal(TerminalEvent::Key(key)) => {
                let intent = self
                    .key_bindings
                    .resolve(key)
                    .unwrap_or(Intent::InputKey(key));
                let effects = Reducer::reduce(&mut self.picker, intent);
                self.apply_effects(effects)
            }
            AppEvent::Terminal(TerminalEvent::Tick) => {
                let effects = Reducer::reduce(&mut self.picker, Intent::Tick);
                self.apply_effects(effects)
            }
            AppEvent::System(event) => {
                let effects = Reducer::system(&mut self.picker, &event);
                self.apply_effects(effects)
            }
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> Result<()> {
        let mut render_requested = false;

        for effect in effects {
            match effect {
                Effect::Picker(action) => self.session.record(action),
                Effect::Schedule(cmd) => {
                    self.scheduler.schedule(cmd, Instant::now());
                }
                Effect::RequestRender => {
                    render_requested = true;
                }
            }
        }

        if render_requested && !self.session.is_closed() {
            self.render()?;
        }

        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let frame = compose_frame(&self.picker, self.terminal.size());
        self.terminal.render_frame(&frame)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerConfig;
    use crate::widgets::shared::datetime::DateTime;

    fn dt(year: i32, month: u32, day: u32) -> DateTime {
        DateTime::from_ymd_hm(year, month, day, 0, 0).expect("valid datetime")
    }

    #[test]
    fn confirmed_outcome_wins_over_close() {
        let mut session = Session::default();
        session.record(PickerAction::ValueChanged(Value::Date(dt(2024, 1, 12))));
        session.record(PickerAction::Confirmed {
            target: ConfirmTarget::Host,
            value: Value::Date(dt(2024, 1, 12)),
        });
        session.record(PickerAction::Closed {
            reason: CloseReason::Confirm,
        });
        assert!(session.is_closed());
        assert_eq!(session.last_value(), Some(&Value::Date(dt(2024, 1, 12))));
        assert_eq!(
            session.finish(),
            Outcome::Confirmed {
                target: ConfirmTarget::Host,
                value: Value::Date(dt(2024, 1, 12)),
            }
        );
    }

    #[test]
    fn refused_open_ends_as_closed() {
        let mut session = Session::default();
        session.record(PickerAction::Closed {
            reason: CloseReason::Misconfigured,
        });
        let outcome = session.finish();
        assert_eq!(
            outcome,
            Outcome::Closed {
                reason: CloseReason::Misconfigured
            }
        );
        let json = serde_json::to_value(&outcome).expect("outcome json");
        assert_eq!(json["outcome"], "closed");
        assert_eq!(json["reason"], "misconfigured");
    }

    #[test]
    fn outcome_serializes_tab_target_and_value() {
        let outcome = Outcome::Confirmed {
            target: ConfirmTarget::Tab(1),
            value: Value::Number(10),
        };
        let json = serde_json::to_value(&outcome).expect("outcome json");
        assert_eq!(json["outcome"], "confirmed");
        assert_eq!(json["target"]["tab"], 1);
        assert_eq!(json["value"]["kind"], "number");
        assert_eq!(json["value"]["value"], 10);
    }

    #[test]
    fn frame_is_framed_in_gutter() {
        let config = PickerConfig::default().with_date(dt(2024, 1, 15));
        let mut picker = DatePicker::new(&config).expect("picker");
        picker.open();
        let frame = compose_frame(
            &picker,
            TerminalSize {
                width: 80,
                height: 24,
            },
        );
        let text = frame.text_lines();
        assert_eq!(text.first().map(String::as_str), Some("┌  "));
        assert!(text[1].starts_with("◇  ") && text[1].contains("January 2024"));
        assert_eq!(text.last().map(String::as_str), Some("└  "));
        assert_eq!(frame.cursor, None);
    }
}
