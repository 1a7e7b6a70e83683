//! The modal picker: header, month grid, date/time fields, wheel panels,
//! working-days counter, tabs and buttons around one `Selection`.

mod interaction;
mod render;

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::PickerConfig;
use crate::core::value::Value;
use crate::error::Result;
use crate::runtime::event::{AppEvent, CloseReason, ConfirmTarget, PickerAction, SystemEvent};
use crate::runtime::scheduler::SchedulerCommand;
use crate::terminal::{KeyCode, KeyEvent, TerminalSize};
use crate::ui::span::{Span, SpanLine, centered};
use crate::ui::theme::Theme;
use crate::widgets::base::ModalBase;
use crate::widgets::components::calendar::{CalendarView, GRID_WIDTH};
use crate::widgets::components::segmented::SegmentedControl;
use crate::widgets::components::wheel::{Wheel, WheelItem};
use crate::widgets::inputs::counter::Counter;
use crate::widgets::inputs::date_text::{DateText, parse_committed};
use crate::widgets::inputs::time_text::{TimeText, TimeUnit};
use crate::widgets::inputs::year_input::YearInput;
use crate::widgets::shared::bounds::{Bounds, MinuteInterval};
use crate::widgets::shared::calendar;
use crate::widgets::shared::datetime::DateTime;
use crate::widgets::shared::locale::{Label, Language, capitalize};
use crate::widgets::shared::mode::{Layout, PickerMode};
use crate::widgets::shared::selection::{Selection, Side};
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};

const BLUR_CHECK_DELAY: Duration = Duration::from_millis(100);
const MONTH_WHEEL_WIDTH: usize = 10;
const YEAR_WHEEL_WIDTH: usize = 4;
const TIME_WHEEL_WIDTH: usize = 2;

// ── Panel & focus ─────────────────────────────────────────────────────────────

/// Wheel panel currently expanded (compact layout only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    None,
    MonthYear,
    Time(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Month navigation arrows and title.
    Header,
    Month,
    Year,
    YearInput,
    Grid,
    Date(Side),
    /// Compact time display; opens the time panel.
    TimeToggle(Side),
    Hour(Side),
    Minute(Side),
    Counter,
    Tabs,
    Select,
    Cancel,
    Ok,
}

impl Focus {
    pub fn id(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Month => "month",
            Self::Year => "year",
            Self::YearInput => "year_input",
            Self::Grid => "grid",
            Self::Date(Side::Start) => "start_date",
            Self::Date(Side::End) => "end_date",
            Self::TimeToggle(Side::Start) => "start_time",
            Self::TimeToggle(Side::End) => "end_time",
            Self::Hour(Side::Start) => "start_hour",
            Self::Hour(Side::End) => "end_hour",
            Self::Minute(Side::Start) => "start_minute",
            Self::Minute(Side::End) => "end_minute",
            Self::Counter => "working_days",
            Self::Tabs => "tabs",
            Self::Select => "select",
            Self::Cancel => "cancel",
            Self::Ok => "ok",
        }
    }

    fn side(self) -> Option<Side> {
        match self {
            Self::Date(side) | Self::TimeToggle(side) | Self::Hour(side) | Self::Minute(side) => {
                Some(side)
            }
            _ => None,
        }
    }
}

fn side_key(side: Side) -> &'static str {
    match side {
        Side::Start => "start",
        Side::End => "end",
    }
}

/// Per-side inputs. The wheels serve the compact layout, the text fields
/// the wide one.
struct SideFields {
    date: DateText,
    hour_text: TimeText,
    minute_text: TimeText,
    hour_wheel: Wheel,
    minute_wheel: Wheel,
}

impl SideFields {
    fn new(side: Side) -> Self {
        let minute_id = Focus::Minute(side).id();
        Self {
            date: DateText::new(Focus::Date(side).id(), ""),
            hour_text: TimeText::new(Focus::Hour(side).id(), TimeUnit::Hour)
                .with_next_field(minute_id),
            minute_text: TimeText::new(minute_id, TimeUnit::Minute),
            hour_wheel: Wheel::new(Focus::Hour(side).id(), TIME_WHEEL_WIDTH),
            minute_wheel: Wheel::new(minute_id, TIME_WHEEL_WIDTH),
        }
    }
}

// ── DatePicker ────────────────────────────────────────────────────────────────

pub struct DatePicker {
    base: ModalBase,
    base_mode: PickerMode,
    mode: PickerMode,
    range: bool,
    layout: Layout,
    use_year_input: bool,
    language: Language,
    theme: Theme,
    /// Set when the bounds are inverted; the picker then refuses to open.
    misconfigured: bool,
    bounds: Bounds,
    interval: MinuteInterval,
    initial: DateTime,
    initial_end: Option<DateTime>,
    today: DateTime,
    visible: DateTime,
    selection: Selection,
    panel: Panel,
    focus: Focus,
    calendar: CalendarView,
    start: SideFields,
    end: SideFields,
    month_wheel: Wheel,
    year_wheel: Wheel,
    year_input: YearInput,
    counter: Counter,
    tabs: SegmentedControl,
}

impl DatePicker {
    pub fn new(config: &PickerConfig) -> Result<Self> {
        let interval = config.interval()?;
        let (bounds, misconfigured) = match config.bounds() {
            Ok(bounds) => (bounds, false),
            Err(err) => {
                warn!(error = %err, "picker misconfigured, it will refuse to open");
                (Bounds::fallback(), true)
            }
        };

        let today = DateTime::now();
        let initial = config.date.unwrap_or(today);
        let range = config.with_end_date;
        let selection = Selection::open(initial, config.end_date, range, bounds, interval);

        Ok(Self {
            base: ModalBase::new("date_picker", ""),
            base_mode: config.mode,
            mode: config.initial_mode(),
            range,
            layout: config.layout,
            use_year_input: config.use_year_input,
            language: config.language,
            theme: config.theme(),
            misconfigured,
            bounds,
            interval,
            initial,
            initial_end: config.end_date,
            today,
            visible: selection.start(),
            selection,
            panel: Panel::None,
            focus: Focus::Grid,
            calendar: CalendarView::new(Focus::Grid.id(), selection, today),
            start: SideFields::new(Side::Start),
            end: SideFields::new(Side::End),
            month_wheel: Wheel::new(Focus::Month.id(), MONTH_WHEEL_WIDTH),
            year_wheel: Wheel::new(Focus::Year.id(), YEAR_WHEEL_WIDTH),
            year_input: YearInput::new(Focus::YearInput.id(), ""),
            counter: Counter::new(Focus::Counter.id(), config.working_days),
            tabs: SegmentedControl::new(Focus::Tabs.id(), config.actions.clone(), config.selected),
        })
    }

    /// Pins "today" for the grid highlight.
    pub fn with_today(mut self, today: DateTime) -> Self {
        self.today = today;
        self.calendar = CalendarView::new(Focus::Grid.id(), self.selection, today);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.base.is_visible()
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn visible_month(&self) -> DateTime {
        self.visible
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected_tab(&self) -> Option<usize> {
        self.tabs.selected()
    }

    pub fn working_days(&self) -> u64 {
        self.counter.count()
    }

    pub fn render_context(&self, size: TerminalSize) -> RenderContext {
        RenderContext::new(size, self.theme, self.language)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Shows the picker with a fresh selection seeded from the configured
    /// initial values.
    pub fn open(&mut self) -> InteractionResult {
        if self.misconfigured {
            warn!("refusing to open: minimum date is after maximum date");
            let mut result = InteractionResult::consumed();
            result.push_picker(PickerAction::Closed {
                reason: CloseReason::Misconfigured,
            });
            return result;
        }

        let mut selection = Selection::open(
            self.initial,
            self.initial_end,
            self.range,
            self.bounds,
            self.interval,
        );
        if self.mode == PickerMode::Time {
            selection = selection.with_end_at_start();
        }
        self.selection = selection;
        self.visible = selection.start();
        self.panel = Panel::None;
        self.base.open();

        self.calendar.set_selection(selection);
        self.calendar.rebuild(self.visible);
        self.calendar.set_cursor(selection.start());
        self.sync_selection_widgets();
        self.sync_month_year();

        self.focus = self.default_focus();
        self.focus_widget();
        debug!(mode = %self.mode, range = self.range, start = %selection.start(), "picker opened");
        InteractionResult::handled()
    }

    /// The single close path.
    pub fn hide_picker(&mut self, reason: CloseReason) -> InteractionResult {
        if !self.base.is_visible() {
            return InteractionResult::ignored();
        }
        self.base.close();
        self.panel = Panel::None;
        debug!(?reason, "picker closed");
        let mut result = InteractionResult::handled();
        result.push_picker(PickerAction::Closed { reason });
        result
    }

    pub fn cancel(&mut self, reason: CloseReason) -> InteractionResult {
        if !self.base.is_visible() {
            return InteractionResult::ignored();
        }
        let mut result = InteractionResult::handled();
        result.push_picker(PickerAction::Cancelled);
        result.merge(self.hide_picker(reason));
        result
    }

    /// Normalizes, reports the value to the selected tab or the host, and
    /// closes.
    pub fn confirm(&mut self) -> InteractionResult {
        if !self.base.is_visible() {
            return InteractionResult::ignored();
        }
        let before = self.selection.picked();
        self.selection = self.selection.normalize();
        let mut result = InteractionResult::handled();
        self.emit_if_changed(before, &mut result);

        let target = match self.tabs.selected() {
            Some(index) => ConfirmTarget::Tab(index),
            None => ConfirmTarget::Host,
        };
        let value = self.current_value();
        debug!(?target, ?value, "picker confirmed");
        result.push_picker(PickerAction::Confirmed { target, value });
        result.merge(self.hide_picker(CloseReason::Confirm));
        result
    }

    /// Routes an external close request by cause.
    pub fn dismiss(&mut self, reason: CloseReason) -> InteractionResult {
        match reason {
            CloseReason::Confirm => self.confirm(),
            CloseReason::Cancel | CloseReason::Backdrop | CloseReason::Back => self.cancel(reason),
            CloseReason::Programmatic | CloseReason::Misconfigured => self.hide_picker(reason),
        }
    }

    fn current_value(&self) -> Value {
        match self.mode {
            PickerMode::WorkingDays => {
                Value::Number(i64::try_from(self.counter.count()).unwrap_or(i64::MAX))
            }
            PickerMode::NoDate => Value::None,
            _ => Value::from_picked(self.selection.picked()),
        }
    }

    // ── Selection operations ──────────────────────────────────────────────────

    /// A tap on a grid day.
    pub fn tap(&mut self, day: DateTime) -> InteractionResult {
        self.tracked(|picker| picker.select_day(day))
    }

    /// Previous (`-1`) or next (`1`) month. Disabled at the bounds and while
    /// a panel is open.
    pub fn navigate(&mut self, delta: i64) -> InteractionResult {
        self.tracked(|picker| picker.shift_month(delta))
    }

    /// Runs `op` and reports a resulting change of the picked value.
    fn tracked(&mut self, op: impl FnOnce(&mut Self) -> InteractionResult) -> InteractionResult {
        if !self.base.is_visible() {
            return InteractionResult::ignored();
        }
        let before = self.selection.picked();
        let mut result = op(self);
        self.finish(before, &mut result);
        result
    }

    fn select_day(&mut self, day: DateTime) -> InteractionResult {
        self.selection = self.selection.select_date(day, true);
        self.calendar.set_cursor(day);
        InteractionResult::handled()
    }

    fn shift_month(&mut self, delta: i64) -> InteractionResult {
        if self.panel != Panel::None || !self.can_navigate(delta) {
            debug!(delta, month = %self.visible.month_key(), "month navigation blocked");
            return InteractionResult::consumed();
        }
        self.set_visible(calendar::shift_month(self.visible, delta, &self.bounds));
        self.selection = self.selection.follow_visible_month(self.visible);
        let mut result = InteractionResult::handled();
        self.settle(&mut result);
        debug!(month = %self.visible.month_key(), "month navigated");
        result
    }

    fn can_navigate(&self, delta: i64) -> bool {
        if delta < 0 {
            calendar::can_navigate_back(self.visible, &self.bounds)
        } else {
            calendar::can_navigate_forward(self.visible, &self.bounds)
        }
    }

    fn set_visible(&mut self, visible: DateTime) {
        self.visible = self.bounds.clamp_date(visible);
        self.calendar.rebuild(self.visible);
        self.sync_month_year();
    }

    /// Month or year wheel change. Compact wheels move the start onto the
    /// visible month; wide selectors only make it follow outside range mode.
    fn pick_month_year(&mut self, year: i32, month: u32) {
        self.set_visible(self.visible.with_date_parts(year, month, self.visible.day()));
        self.selection = match self.layout {
            Layout::Compact => self.selection.pick_month_year(Side::Start, self.visible),
            Layout::Wide => self.selection.follow_visible_month(self.visible),
        };
    }

    fn commit_date(&mut self, side: Side, year: i32, month: u32, day: u32) {
        let next = self.selection.commit_date(side, year, month, day);
        if next == self.selection {
            return;
        }
        self.selection = next;
        if let Some(committed) = next.get(side)
            && !committed.same_month(self.visible)
        {
            self.visible = committed;
            self.calendar.rebuild(committed);
            self.sync_month_year();
        }
        if let Some(committed) = next.get(side) {
            self.calendar.set_cursor(committed);
        }
    }

    fn set_time(&mut self, side: Side, hour: u32, minute: u32) {
        self.selection = self.selection.set_time(side, hour, minute);
        self.refresh_time_wheels(Side::Start);
        self.refresh_time_wheels(Side::End);
    }

    /// Closes any panel; outside range mode the start follows the visible
    /// month.
    fn select(&mut self) -> InteractionResult {
        let closed = self.panel;
        self.panel = Panel::None;
        if !self.range {
            self.selection = self.selection.follow_visible_month(self.visible);
        }
        let mut result = InteractionResult::handled();
        self.settle(&mut result);
        self.focus = match closed {
            Panel::MonthYear => Focus::Header,
            Panel::Time(side) => Focus::TimeToggle(side),
            Panel::None => self.focus,
        };
        result
    }

    fn apply_tab(&mut self, index: Option<usize>) {
        self.mode = index
            .and_then(|index| self.tabs.tabs().get(index))
            .map(|tab| tab.mode)
            .unwrap_or(self.base_mode);
        self.panel = Panel::None;
        debug!(mode = %self.mode, tab = ?index, "mode switched by tab");
    }

    /// Normalizes and, while a time panel is open, schedules the check that
    /// closes it once focus has settled elsewhere.
    fn settle(&mut self, result: &mut InteractionResult) {
        self.selection = self.selection.normalize();
        if let Panel::Time(side) = self.panel {
            result.push_schedule(SchedulerCommand::Debounce {
                key: format!("blur:{}", side_key(side)),
                delay: BLUR_CHECK_DELAY,
                event: AppEvent::System(SystemEvent::BlurCheck { side }),
            });
        }
    }

    fn blur_check(&mut self, side: Side) -> InteractionResult {
        if self.panel != Panel::Time(side) {
            return InteractionResult::ignored();
        }
        let keeps_panel = matches!(
            self.focus,
            Focus::Hour(s) | Focus::Minute(s) if s == side
        ) || self.focus == Focus::Select;
        if keeps_panel {
            return InteractionResult::consumed();
        }
        trace!(side = side_key(side), "time panel closed after blur");
        self.panel = Panel::None;
        self.ensure_focus();
        InteractionResult::handled()
    }

    // ── Change tracking ───────────────────────────────────────────────────────

    fn finish(&mut self, before: (DateTime, Option<DateTime>), result: &mut InteractionResult) {
        if self.base.is_visible() {
            self.emit_if_changed(before, result);
            self.ensure_focus();
        }
    }

    fn emit_if_changed(
        &mut self,
        before: (DateTime, Option<DateTime>),
        result: &mut InteractionResult,
    ) {
        let picked = self.selection.picked();
        if picked == before {
            return;
        }
        self.sync_selection_widgets();
        if self.mode.uses_selection() {
            result.push_picker(PickerAction::ValueChanged(Value::from_picked(picked)));
        }
    }

    // ── Widget sync ───────────────────────────────────────────────────────────

    fn fields(&self, side: Side) -> &SideFields {
        match side {
            Side::Start => &self.start,
            Side::End => &self.end,
        }
    }

    fn fields_mut(&mut self, side: Side) -> &mut SideFields {
        match side {
            Side::Start => &mut self.start,
            Side::End => &mut self.end,
        }
    }

    fn sync_selection_widgets(&mut self) {
        self.calendar.set_selection(self.selection);
        for side in [Side::Start, Side::End] {
            let value = self.selection.get(side);
            let fields = self.fields_mut(side);
            match value {
                Some(value) => {
                    fields.date.sync(value);
                    fields.hour_text.sync(value.hour());
                    fields.minute_text.sync(value.minute());
                }
                None => fields.date.set_value(Value::Text(String::new())),
            }
            self.refresh_time_wheels(side);
        }
    }

    fn refresh_time_wheels(&mut self, side: Side) {
        let Some(value) = self.selection.get(side) else {
            return;
        };
        let hours = self
            .selection
            .hour_options(side)
            .map(WheelItem::padded)
            .collect();
        let minutes = self
            .selection
            .minute_options(side)
            .into_iter()
            .map(WheelItem::padded)
            .collect();
        let fields = self.fields_mut(side);
        fields.hour_wheel.set_items(hours, value.hour().into());
        fields.minute_wheel.set_items(minutes, value.minute().into());
    }

    fn sync_month_year(&mut self) {
        let language = self.language;
        let months = calendar::month_options(self.visible, &self.bounds)
            .into_iter()
            .map(|month| WheelItem::new(month.into(), capitalize(language.month_name(month))))
            .collect();
        self.month_wheel.set_items(months, self.visible.month().into());
        let years = calendar::year_options(&self.bounds)
            .map(|year| WheelItem::new(year.into(), year.to_string()))
            .collect();
        self.year_wheel.set_items(years, self.visible.year().into());
        if self.focus != Focus::YearInput {
            self.year_input.sync(self.visible.year());
        }
    }

    // ── Focus ─────────────────────────────────────────────────────────────────

    /// Sides with visible fields: the end appears once a range end exists.
    fn sides(&self) -> Vec<Side> {
        if self.range && self.selection.end().is_some() {
            vec![Side::Start, Side::End]
        } else {
            vec![Side::Start]
        }
    }

    fn focus_ring(&self) -> Vec<Focus> {
        if self.panel == Panel::MonthYear {
            return vec![Focus::Month, Focus::Year, Focus::Select];
        }

        let mut ring = Vec::new();
        if self.mode.has_calendar() {
            ring.push(Focus::Header);
            match self.layout {
                Layout::Wide => {
                    ring.push(Focus::Month);
                    ring.push(if self.use_year_input {
                        Focus::YearInput
                    } else {
                        Focus::Year
                    });
                }
                Layout::Compact if self.use_year_input => ring.push(Focus::YearInput),
                Layout::Compact => {}
            }
            ring.push(Focus::Grid);
        }
        if self.mode.uses_selection() {
            for side in self.sides() {
                if self.mode.has_calendar() {
                    ring.push(Focus::Date(side));
                }
                if self.mode.has_time() {
                    match self.layout {
                        Layout::Compact => {
                            ring.push(Focus::TimeToggle(side));
                            if self.panel == Panel::Time(side) {
                                ring.extend([
                                    Focus::Hour(side),
                                    Focus::Minute(side),
                                    Focus::Select,
                                ]);
                            }
                        }
                        Layout::Wide => ring.extend([Focus::Hour(side), Focus::Minute(side)]),
                    }
                }
            }
        }
        if self.mode == PickerMode::WorkingDays {
            ring.push(Focus::Counter);
        }
        if !self.tabs.is_empty() {
            ring.push(Focus::Tabs);
        }
        if self.panel == Panel::None {
            ring.extend([Focus::Cancel, Focus::Ok]);
        }
        ring
    }

    fn default_focus(&self) -> Focus {
        let ring = self.focus_ring();
        if ring.contains(&Focus::Grid) {
            return Focus::Grid;
        }
        ring.iter()
            .copied()
            .find(|focus| !matches!(focus, Focus::Header | Focus::Cancel | Focus::Ok))
            .unwrap_or(Focus::Ok)
    }

    fn ensure_focus(&mut self) {
        if self.focus_ring().contains(&self.focus) {
            return;
        }
        self.focus = match self.focus.side() {
            Some(side) if self.focus_ring().contains(&Focus::TimeToggle(side)) => {
                Focus::TimeToggle(side)
            }
            _ => self.default_focus(),
        };
        self.focus_widget();
    }

    fn focus_widget(&mut self) {
        match self.focus {
            Focus::YearInput => self.year_input.on_focus(),
            Focus::Date(side) => self.fields_mut(side).date.on_focus(),
            Focus::Hour(side) => self.fields_mut(side).hour_text.on_focus(),
            Focus::Minute(side) => self.fields_mut(side).minute_text.on_focus(),
            Focus::Counter => self.counter.on_focus(),
            _ => {}
        }
    }

    /// Moves focus, running the blur handling of the field being left.
    fn set_focus(&mut self, next: Focus) -> InteractionResult {
        if next == self.focus {
            return InteractionResult::consumed();
        }
        let left = self.focus;
        let mut result = InteractionResult::handled();
        self.focus = next;
        self.blur(left, &mut result);
        self.focus_widget();
        result
    }

    fn blur(&mut self, left: Focus, result: &mut InteractionResult) {
        match left {
            Focus::Date(side) => {
                self.calendar.rebuild(self.visible);
                self.settle(result);
                if let Some(value) = self.selection.get(side) {
                    self.fields_mut(side).date.sync(value);
                }
            }
            Focus::YearInput => {
                self.set_visible(self.visible);
                self.selection = self.selection.follow_visible_month(self.visible);
                self.settle(result);
            }
            Focus::TimeToggle(_) | Focus::Hour(_) | Focus::Minute(_) => self.settle(result),
            _ => {}
        }
    }

    pub fn focus_next(&mut self) -> InteractionResult {
        self.tracked(|picker| picker.cycle_focus(1))
    }

    pub fn focus_prev(&mut self) -> InteractionResult {
        self.tracked(|picker| picker.cycle_focus(-1))
    }

    fn cycle_focus(&mut self, step: isize) -> InteractionResult {
        let ring = self.focus_ring();
        if ring.is_empty() {
            return InteractionResult::ignored();
        }
        let len = ring.len() as isize;
        let index = ring.iter().position(|focus| *focus == self.focus).unwrap_or(0) as isize;
        let next = ring[(index + step).rem_euclid(len) as usize];
        self.set_focus(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PickerError;
    use crate::runtime::event::WidgetAction;
    use crate::widgets::components::segmented::TabAction;
    use crate::widgets::shared::selection::SelectionState;

    fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime {
        DateTime::from_ymd_hm(year, month, day, hour, minute).expect("valid datetime")
    }

    fn opened(config: PickerConfig) -> DatePicker {
        let mut picker = DatePicker::new(&config)
            .expect("picker")
            .with_today(dt(2024, 1, 16, 0, 0));
        picker.open();
        picker
    }

    fn press(picker: &mut DatePicker, code: KeyCode) -> InteractionResult {
        picker.on_key(KeyEvent::new(code))
    }

    fn actions(result: &InteractionResult) -> Vec<PickerAction> {
        result.picker_actions().cloned().collect()
    }

    fn text(picker: &DatePicker) -> Vec<String> {
        let ctx = picker.render_context(TerminalSize {
            width: 80,
            height: 24,
        });
        picker
            .draw(&ctx)
            .lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect())
            .collect()
    }

    fn tabs() -> Vec<TabAction> {
        vec![
            TabAction::new("Date", PickerMode::Date),
            TabAction::new("Deadline", PickerMode::WorkingDays),
        ]
    }

    #[test]
    fn tap_scenario_builds_a_range() {
        let mut picker = opened(
            PickerConfig::default()
                .with_bounds(dt(2024, 1, 10, 0, 0), dt(2024, 1, 20, 0, 0))
                .with_date(dt(2024, 1, 15, 0, 0))
                .with_range(true),
        );

        let result = picker.tap(dt(2024, 1, 5, 0, 0));
        assert!(actions(&result).is_empty());
        assert_eq!(picker.selection().start(), dt(2024, 1, 15, 0, 0));

        // The first tap restarts the range even after the seeded start.
        picker.tap(dt(2024, 1, 15, 0, 0));
        assert_eq!(picker.selection().state(), SelectionState::AwaitingEnd);

        let result = picker.tap(dt(2024, 1, 12, 0, 0));
        assert_eq!(
            actions(&result),
            vec![PickerAction::ValueChanged(Value::Date(dt(2024, 1, 12, 0, 0)))]
        );
        assert_eq!(picker.selection().end(), None);

        let result = picker.tap(dt(2024, 1, 18, 0, 0));
        assert_eq!(
            actions(&result),
            vec![PickerAction::ValueChanged(Value::Range(
                dt(2024, 1, 12, 0, 0),
                dt(2024, 1, 18, 0, 0)
            ))]
        );

        let result = picker.confirm();
        assert_eq!(
            actions(&result),
            vec![
                PickerAction::Confirmed {
                    target: ConfirmTarget::Host,
                    value: Value::Range(dt(2024, 1, 12, 0, 0), dt(2024, 1, 18, 0, 0)),
                },
                PickerAction::Closed {
                    reason: CloseReason::Confirm
                },
            ]
        );
        assert!(!picker.is_visible());
    }

    #[test]
    fn date_mode_tap_keeps_time_of_day() {
        let mut picker = opened(PickerConfig::default().with_date(dt(2024, 1, 15, 14, 35)));
        let result = picker.tap(dt(2024, 1, 16, 0, 0));
        assert_eq!(picker.selection().start(), dt(2024, 1, 16, 14, 35));
        assert_eq!(
            actions(&result),
            vec![PickerAction::ValueChanged(Value::Date(dt(2024, 1, 16, 14, 35)))]
        );
    }

    #[test]
    fn year_input_is_unchecked_until_blur() {
        let mut picker = opened(
            PickerConfig::default()
                .with_year_input(true)
                .with_bounds(dt(2024, 3, 1, 0, 0), dt(2024, 12, 31, 0, 0))
                .with_date(dt(2024, 6, 15, 10, 0)),
        );
        picker.focus_prev();
        assert_eq!(picker.focus(), Focus::YearInput);

        let changes: usize = "1999"
            .chars()
            .map(|ch| actions(&press(&mut picker, KeyCode::Char(ch))).len())
            .sum();
        assert_eq!(changes, 0);
        assert_eq!(picker.visible_month().year(), 1999);
        assert_eq!(picker.selection().start(), dt(2024, 6, 15, 10, 0));

        let result = picker.focus_next();
        assert_eq!(picker.focus(), Focus::Grid);
        assert_eq!(picker.visible_month(), dt(2024, 3, 1, 10, 0));
        assert_eq!(picker.selection().start(), dt(2024, 3, 15, 10, 0));
        assert_eq!(
            actions(&result),
            vec![PickerAction::ValueChanged(Value::Date(dt(2024, 3, 15, 10, 0)))]
        );
    }

    #[test]
    fn grid_enter_taps_cursor_day() {
        let mut picker = opened(PickerConfig::default().with_date(dt(2024, 1, 15, 0, 0)));
        assert_eq!(picker.focus(), Focus::Grid);
        press(&mut picker, KeyCode::Right);
        let result = press(&mut picker, KeyCode::Enter);
        assert_eq!(
            actions(&result),
            vec![PickerAction::ValueChanged(Value::Date(dt(2024, 1, 16, 0, 0)))]
        );
    }

    #[test]
    fn workingdays_tab_confirm_carries_counter() {
        let mut picker = opened(
            PickerConfig::default()
                .with_actions(tabs(), Some(1))
                .with_working_days(12),
        );
        assert_eq!(picker.mode(), PickerMode::WorkingDays);
        assert_eq!(picker.focus(), Focus::Counter);

        let result = picker.confirm();
        assert_eq!(
            actions(&result)[0],
            PickerAction::Confirmed {
                target: ConfirmTarget::Tab(1),
                value: Value::Number(12),
            }
        );
    }

    #[test]
    fn pressing_selected_tab_reverts_to_base_mode() {
        let mut picker = opened(
            PickerConfig::default()
                .with_mode(PickerMode::DateTime)
                .with_date(dt(2024, 1, 15, 9, 0))
                .with_actions(tabs(), Some(1)),
        );
        picker.focus_next();
        assert_eq!(picker.focus(), Focus::Tabs);

        press(&mut picker, KeyCode::Enter);
        assert_eq!(picker.mode(), PickerMode::DateTime);
        assert_eq!(picker.selected_tab(), None);
        // The tab strip keeps focus after the mode change.
        assert_eq!(picker.focus(), Focus::Tabs);

        let result = picker.confirm();
        assert_eq!(
            actions(&result)[0],
            PickerAction::Confirmed {
                target: ConfirmTarget::Host,
                value: Value::Date(dt(2024, 1, 15, 9, 0)),
            }
        );
    }

    #[test]
    fn inverted_bounds_refuse_to_open() {
        let config =
            PickerConfig::default().with_bounds(dt(2024, 3, 1, 0, 0), dt(2024, 1, 1, 0, 0));
        let mut picker = DatePicker::new(&config).expect("picker is built");
        let result = picker.open();
        assert_eq!(
            actions(&result),
            vec![PickerAction::Closed {
                reason: CloseReason::Misconfigured
            }]
        );
        assert!(!picker.is_visible());
        assert!(text(&picker).is_empty());
    }

    #[test]
    fn invalid_interval_is_an_error() {
        let config = PickerConfig::default().with_minute_interval(7);
        assert!(matches!(
            DatePicker::new(&config),
            Err(PickerError::InvalidMinuteInterval(7))
        ));
    }

    #[test]
    fn time_range_seeds_end_at_start() {
        let picker = opened(
            PickerConfig::default()
                .with_mode(PickerMode::Time)
                .with_range(true)
                .with_date(dt(2024, 5, 1, 9, 30)),
        );
        assert_eq!(picker.selection().end(), Some(dt(2024, 5, 1, 9, 30)));
        assert_eq!(picker.focus(), Focus::TimeToggle(Side::Start));
    }

    #[test]
    fn time_panel_closes_after_blur_check() {
        let mut picker = opened(
            PickerConfig::default()
                .with_mode(PickerMode::DateTime)
                .with_date(dt(2024, 1, 15, 9, 0)),
        );
        picker.focus_next();
        picker.focus_next();
        assert_eq!(picker.focus(), Focus::TimeToggle(Side::Start));

        press(&mut picker, KeyCode::Enter);
        assert_eq!(picker.panel(), Panel::Time(Side::Start));
        assert_eq!(picker.focus(), Focus::Hour(Side::Start));

        let result = press(&mut picker, KeyCode::Down);
        assert_eq!(
            actions(&result),
            vec![PickerAction::ValueChanged(Value::Date(dt(2024, 1, 15, 10, 0)))]
        );

        let result = picker.focus_next();
        assert!(result.actions.iter().any(|action| matches!(
            action,
            WidgetAction::Schedule(SchedulerCommand::Debounce { key, .. }) if key == "blur:start"
        )));

        // Focus is still inside the panel.
        picker.on_system_event(&SystemEvent::BlurCheck { side: Side::Start });
        assert_eq!(picker.panel(), Panel::Time(Side::Start));

        picker.focus_next();
        picker.focus_next();
        assert_eq!(picker.focus(), Focus::Header);
        picker.on_system_event(&SystemEvent::BlurCheck { side: Side::Start });
        assert_eq!(picker.panel(), Panel::None);
        assert_eq!(picker.focus(), Focus::Header);
    }

    #[test]
    fn navigation_moves_start_and_stops_at_bounds() {
        let mut picker = opened(
            PickerConfig::default()
                .with_bounds(dt(2024, 1, 1, 0, 0), dt(2024, 2, 20, 0, 0))
                .with_date(dt(2024, 1, 15, 0, 0)),
        );
        let result = picker.navigate(1);
        assert_eq!(picker.visible_month().month(), 2);
        assert_eq!(
            actions(&result),
            vec![PickerAction::ValueChanged(Value::Date(dt(2024, 2, 15, 0, 0)))]
        );

        picker.navigate(1);
        assert_eq!(picker.visible_month().month(), 2);

        let result = press(&mut picker, KeyCode::PageUp);
        assert!(result.handled);
        assert_eq!(picker.visible_month().month(), 1);
    }

    #[test]
    fn typed_date_commits_once_and_moves_visible_month() {
        let mut picker = opened(PickerConfig::default().with_date(dt(2024, 1, 15, 0, 0)));
        picker.focus_next();
        assert_eq!(picker.focus(), Focus::Date(Side::Start));

        let changes: usize = "15032024"
            .chars()
            .map(|ch| actions(&press(&mut picker, KeyCode::Char(ch))).len())
            .sum();
        assert_eq!(changes, 1);
        assert_eq!(picker.selection().start(), dt(2024, 3, 15, 0, 0));
        assert_eq!(picker.visible_month().month(), 3);
    }

    #[test]
    fn wide_hour_text_jumps_to_minutes() {
        let mut picker = opened(
            PickerConfig::default()
                .with_mode(PickerMode::DateTime)
                .with_layout(Layout::Wide)
                .with_date(dt(2024, 1, 15, 9, 0)),
        );
        picker.focus_next();
        picker.focus_next();
        assert_eq!(picker.focus(), Focus::Hour(Side::Start));

        press(&mut picker, KeyCode::Char('5'));
        assert_eq!(picker.focus(), Focus::Minute(Side::Start));
        assert_eq!(picker.selection().start().hour(), 5);
    }

    #[test]
    fn dismiss_cancels_then_closes() {
        let mut picker = opened(PickerConfig::default());
        let result = picker.dismiss(CloseReason::Backdrop);
        assert_eq!(
            actions(&result),
            vec![
                PickerAction::Cancelled,
                PickerAction::Closed {
                    reason: CloseReason::Backdrop
                },
            ]
        );
        assert!(!press(&mut picker, KeyCode::Enter).handled);
        assert!(actions(&picker.dismiss(CloseReason::Back)).is_empty());
    }

    #[test]
    fn draws_compact_and_wide_headers() {
        let picker = opened(PickerConfig::default().with_date(dt(2024, 1, 15, 0, 0)));
        let lines = text(&picker);
        assert!(lines[0].contains("January 2024"), "{}", lines[0]);
        let buttons = lines.last().expect("button row");
        assert!(buttons.contains("[ Cancel ]") && buttons.contains("[ OK ]"));

        let picker = opened(
            PickerConfig::default()
                .with_mode(PickerMode::DateTime)
                .with_layout(Layout::Wide)
                .with_date(dt(2024, 1, 15, 9, 0)),
        );
        let lines = text(&picker);
        assert!(lines[0].contains("January") && lines[0].contains("2024"));
        assert!(lines.iter().any(|line| line.contains("15.01.2024") && line.contains("09:00")));
    }
}
