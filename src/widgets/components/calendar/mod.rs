use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, centered};
use crate::ui::theme::DayCell;
use crate::widgets::base::InputBase;
use crate::widgets::shared::calendar::{self, CalendarGrid, WEEKDAY_COUNT};
use crate::widgets::shared::datetime::{DateTime, Unit};
use crate::widgets::shared::selection::Selection;
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};

const CELL_WIDTH: usize = 4;

pub const GRID_WIDTH: usize = CELL_WIDTH * WEEKDAY_COUNT;

// ── CalendarView ──────────────────────────────────────────────────────────────

/// The month grid. It owns a keyboard cursor and a copy of the selection for
/// highlighting; taps are reported upward as `Value::Date`.
pub struct CalendarView {
    base: InputBase,
    grid: CalendarGrid,
    cursor: DateTime,
    selection: Selection,
    today: DateTime,
}

impl CalendarView {
    pub fn new(id: impl Into<String>, selection: Selection, today: DateTime) -> Self {
        let grid = calendar::build_grid(selection.start(), selection.bounds());
        Self {
            base: InputBase::new(id, ""),
            cursor: selection.start().start_of_day(),
            grid,
            selection,
            today,
        }
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn cursor(&self) -> DateTime {
        self.cursor
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Recomputes the grid for `visible`. The cursor stays on its day of
    /// month where possible.
    pub fn rebuild(&mut self, visible: DateTime) {
        self.grid = calendar::build_grid(visible, self.selection.bounds());
        let month = self.grid.month();
        if !self.cursor.same_month(month) {
            self.cursor = self
                .cursor
                .with_date_parts(month.year(), month.month(), self.cursor.day())
                .start_of_day();
        }
    }

    pub fn set_cursor(&mut self, day: DateTime) -> bool {
        if !day.same_month(self.grid.month()) {
            return false;
        }
        self.cursor = day.start_of_day();
        true
    }

    fn move_cursor(&mut self, days: i64) -> InteractionResult {
        let next = self.cursor.add(Unit::Day, days);
        if self.set_cursor(next) {
            InteractionResult::handled()
        } else {
            InteractionResult::consumed()
        }
    }

    fn cell_style(&self, ctx: &RenderContext, day: DateTime, column: usize) -> DayCell {
        let start = self.selection.start();
        let end = self.selection.end();
        DayCell {
            selected: day.same_day(start) || end.is_some_and(|end| day.same_day(end)),
            in_range: end.is_some_and(|end| day.end_of_day() >= start && day.start_of_day() <= end),
            today: day.same_day(self.today),
            weekend: calendar::is_weekend_column(column),
            disabled: !self.selection.bounds().contains_day(day),
            cursor: self.base.is_focused(ctx) && day.same_day(self.cursor),
        }
    }
}

// ── Drawable ──────────────────────────────────────────────────────────────────

impl Drawable for CalendarView {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let theme = &ctx.theme;
        let mut lines = Vec::with_capacity(self.grid.height() + 1);

        lines.push(
            (0..WEEKDAY_COUNT)
                .map(|column| {
                    let name = ctx.language.weekday_short(column).to_uppercase();
                    let style = if calendar::is_weekend_column(column) {
                        theme.error()
                    } else {
                        theme.secondary()
                    };
                    Span::styled(centered(&name, CELL_WIDTH), style).no_wrap()
                })
                .collect(),
        );

        for row in self.grid.rows() {
            let line = row
                .iter()
                .enumerate()
                .map(|(column, cell)| match cell {
                    None => Span::new(" ".repeat(CELL_WIDTH)).no_wrap(),
                    Some(day) => {
                        let look = self.cell_style(ctx, *day, column);
                        let (l, r) = if look.cursor { ("[", "]") } else { (" ", " ") };
                        Span::styled(format!("{}{:2}{}", l, day.day(), r), theme.day(look))
                            .no_wrap()
                    }
                })
                .collect();
            lines.push(line);
        }

        DrawOutput { lines }
    }
}

// ── Interactive ───────────────────────────────────────────────────────────────

impl Interactive for CalendarView {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-7),
            KeyCode::Down => self.move_cursor(7),
            KeyCode::Home => {
                self.cursor = self.grid.month().start_of_month();
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = self.grid.month().end_of_month().start_of_day();
                InteractionResult::handled()
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                InteractionResult::changed(self.base.id(), Value::Date(self.cursor))
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Date(self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalSize;
    use crate::ui::theme::Theme;
    use crate::widgets::shared::bounds::{Bounds, MinuteInterval};
    use crate::widgets::shared::locale::Language;

    fn dt(year: i32, month: u32, day: u32) -> DateTime {
        DateTime::from_ymd_hm(year, month, day, 9, 0).expect("valid datetime")
    }

    fn view() -> CalendarView {
        let bounds = Bounds::new(dt(2024, 1, 10), dt(2024, 3, 20)).expect("bounds");
        let selection = Selection::open(dt(2024, 1, 15), None, true, bounds, MinuteInterval::ONE);
        CalendarView::new("grid", selection, dt(2024, 1, 16))
    }

    fn ctx(focused: bool) -> RenderContext {
        RenderContext::new(
            TerminalSize {
                width: 80,
                height: 24,
            },
            Theme::default(),
            Language::En,
        )
        .with_focus(focused.then_some("grid"))
    }

    #[test]
    fn cursor_moves_within_month_only() {
        let mut view = view();
        view.on_key(KeyEvent::new(KeyCode::Down));
        assert_eq!(view.cursor().day(), 22);
        let result = view.on_key(KeyEvent::new(KeyCode::Down));
        assert!(result.handled);
        view.on_key(KeyEvent::new(KeyCode::Down));
        assert_eq!(view.cursor().day(), 29);
        view.on_key(KeyEvent::new(KeyCode::Down));
        assert_eq!(view.cursor().day(), 29);
        view.on_key(KeyEvent::new(KeyCode::Home));
        assert_eq!(view.cursor().day(), 1);
        view.on_key(KeyEvent::new(KeyCode::End));
        assert_eq!(view.cursor().day(), 31);
    }

    #[test]
    fn enter_reports_cursor_day() {
        let mut view = view();
        view.on_key(KeyEvent::new(KeyCode::Right));
        let result = view.on_key(KeyEvent::new(KeyCode::Enter));
        let day = result
            .last_change()
            .and_then(|change| change.value.as_date())
            .expect("tapped day");
        assert_eq!(day.day_key(), "16.01.2024");
    }

    #[test]
    fn rebuild_keeps_day_of_month() {
        let mut view = view();
        view.rebuild(dt(2024, 2, 1));
        assert_eq!(view.cursor().day_key(), "15.02.2024");
        view.set_cursor(dt(2024, 2, 29));
        view.rebuild(dt(2024, 3, 1));
        assert_eq!(view.cursor().day_key(), "29.03.2024");
    }

    #[test]
    fn draws_header_and_marks_cursor() {
        let view = view();
        let out = view.draw(&ctx(true));
        let header: String = out.lines[0].iter().map(|span| span.text.as_str()).collect();
        assert!(header.starts_with("MON "), "{header}");
        let text: Vec<String> = out
            .lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect())
            .collect();
        assert!(text.iter().any(|line| line.contains("[15]")));
        // January 2024 starts on a Monday.
        assert!(text[1].starts_with("  1 "), "{}", text[1]);
    }

    #[test]
    fn disabled_and_selected_cells_are_flagged() {
        let view = view();
        let ctx = ctx(false);
        let before_min = view.cell_style(&ctx, dt(2024, 1, 5), 4);
        assert!(before_min.disabled);
        let start = view.cell_style(&ctx, dt(2024, 1, 15), 0);
        assert!(start.selected);
        assert!(!start.cursor);
        let weekend = view.cell_style(&ctx, dt(2024, 1, 13), 5);
        assert!(weekend.weekend);
        assert!(!weekend.disabled);
    }
}
