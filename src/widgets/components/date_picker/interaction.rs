use super::*;

/// Keeps a child's render and handled flags but not its actions; the picker
/// turns child changes into its own notifications.
fn absorb(child: &InteractionResult) -> InteractionResult {
    InteractionResult {
        handled: child.handled,
        request_render: child.request_render,
        actions: Vec::new(),
    }
}

fn changed_number(child: &InteractionResult) -> Option<i64> {
    child.last_change().and_then(|change| change.value.as_number())
}

fn is_press(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

impl DatePicker {
    fn dispatch(&mut self, key: KeyEvent) -> InteractionResult {
        match self.focus {
            Focus::Header => self.handle_header(key),
            Focus::Month | Focus::Year => self.handle_month_year(key),
            Focus::YearInput => self.handle_year_input(key),
            Focus::Grid => self.handle_grid(key),
            Focus::Date(side) => self.handle_date_text(side, key),
            Focus::TimeToggle(side) => self.handle_time_toggle(side, key),
            Focus::Hour(side) | Focus::Minute(side) => self.handle_time(side, key),
            Focus::Counter => {
                let child = self.counter.on_key(key);
                if child.is_input_done() {
                    return self.cycle_focus(1);
                }
                absorb(&child)
            }
            Focus::Tabs => self.handle_tabs(key),
            Focus::Select | Focus::Cancel | Focus::Ok => self.handle_button(key),
        }
    }

    fn handle_header(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left | KeyCode::PageUp => self.shift_month(-1),
            KeyCode::Right | KeyCode::PageDown => self.shift_month(1),
            _ if is_press(key) && self.layout == Layout::Compact => {
                self.panel = Panel::MonthYear;
                self.sync_month_year();
                self.set_focus(Focus::Month)
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn handle_month_year(&mut self, key: KeyEvent) -> InteractionResult {
        let month_focused = self.focus == Focus::Month;
        let child = if month_focused {
            self.month_wheel.on_key(key)
        } else {
            self.year_wheel.on_key(key)
        };
        if child.is_input_done() {
            return self.cycle_focus(1);
        }
        if let Some(value) = changed_number(&child) {
            let (year, month) = if month_focused {
                (self.visible.year(), u32::try_from(value).unwrap_or(1))
            } else {
                (i32::try_from(value).unwrap_or(self.visible.year()), self.visible.month())
            };
            self.pick_month_year(year, month);
        }
        absorb(&child)
    }

    fn handle_year_input(&mut self, key: KeyEvent) -> InteractionResult {
        let child = self.year_input.on_key(key);
        if child.is_input_done() {
            return self.cycle_focus(1);
        }
        if let Some(year) = changed_number(&child).and_then(|year| i32::try_from(year).ok()) {
            // Unchecked until blur.
            self.visible = self
                .visible
                .with_date_parts(year, self.visible.month(), self.visible.day());
            self.calendar.rebuild(self.visible);
            self.sync_month_year();
        }
        absorb(&child)
    }

    fn handle_grid(&mut self, key: KeyEvent) -> InteractionResult {
        let child = self.calendar.on_key(key);
        match child.last_change().and_then(|change| change.value.as_date()) {
            Some(day) => self.select_day(day),
            None => absorb(&child),
        }
    }

    fn handle_date_text(&mut self, side: Side, key: KeyEvent) -> InteractionResult {
        let child = self.fields_mut(side).date.on_key(key);
        if child.is_input_done() {
            return self.cycle_focus(1);
        }
        let committed = child
            .last_change()
            .and_then(|change| change.value.as_text())
            .and_then(parse_committed);
        if let Some((year, month, day)) = committed {
            self.commit_date(side, year, month, day);
        }
        absorb(&child)
    }

    fn handle_time_toggle(&mut self, side: Side, key: KeyEvent) -> InteractionResult {
        if !is_press(key) {
            return InteractionResult::ignored();
        }
        self.panel = Panel::Time(side);
        self.refresh_time_wheels(side);
        self.set_focus(Focus::Hour(side))
    }

    fn handle_time(&mut self, side: Side, key: KeyEvent) -> InteractionResult {
        let hour_focused = matches!(self.focus, Focus::Hour(_));
        let layout = self.layout;
        let fields = self.fields_mut(side);
        let child = match (layout, hour_focused) {
            (Layout::Compact, true) => fields.hour_wheel.on_key(key),
            (Layout::Compact, false) => fields.minute_wheel.on_key(key),
            (Layout::Wide, true) => fields.hour_text.on_key(key),
            (Layout::Wide, false) => fields.minute_text.on_key(key),
        };
        if child.is_input_done() {
            return self.cycle_focus(1);
        }

        let Some(current) = self.selection.get(side) else {
            return absorb(&child);
        };
        if let Some(value) = changed_number(&child).and_then(|value| u32::try_from(value).ok()) {
            if hour_focused {
                self.set_time(side, value, current.minute());
                // The new hour may offer different minutes.
                if self.layout == Layout::Compact
                    && let Some(minute) = self.fields(side).minute_wheel.selected_value()
                    && let Ok(minute) = u32::try_from(minute)
                    && minute != current.minute()
                {
                    self.set_time(side, value, minute);
                }
            } else {
                self.set_time(side, current.hour(), value);
            }
        }

        if child.focus_request().is_some() {
            let mut result = self.set_focus(Focus::Minute(side));
            result.merge(absorb(&child));
            return result;
        }
        absorb(&child)
    }

    fn handle_tabs(&mut self, key: KeyEvent) -> InteractionResult {
        let child = self.tabs.on_key(key);
        if let Some(change) = child.last_change() {
            let index = change
                .value
                .as_number()
                .and_then(|index| usize::try_from(index).ok());
            self.apply_tab(index);
        }
        absorb(&child)
    }

    fn handle_button(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left if self.focus == Focus::Ok => self.set_focus(Focus::Cancel),
            KeyCode::Right if self.focus == Focus::Cancel => self.set_focus(Focus::Ok),
            _ if is_press(key) => match self.focus {
                Focus::Select => self.select(),
                Focus::Cancel => self.cancel(CloseReason::Cancel),
                _ => self.confirm(),
            },
            _ => InteractionResult::ignored(),
        }
    }
}

impl Interactive for DatePicker {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Group
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.base.is_visible() {
            return InteractionResult::ignored();
        }
        trace!(?key, focus = self.focus.id(), "picker key");
        let before = self.selection.picked();
        let mut result = self.dispatch(key);
        if !result.handled
            && self.mode.has_calendar()
            && matches!(key.code, KeyCode::PageUp | KeyCode::PageDown)
        {
            let delta = if key.code == KeyCode::PageUp { -1 } else { 1 };
            result = self.shift_month(delta);
        }
        self.finish(before, &mut result);
        result
    }

    fn on_system_event(&mut self, event: &SystemEvent) -> InteractionResult {
        match event {
            SystemEvent::BlurCheck { side } => {
                let side = *side;
                self.tracked(|picker| picker.blur_check(side))
            }
            SystemEvent::RequestClose { reason } => self.dismiss(*reason),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(self.current_value())
    }
}
