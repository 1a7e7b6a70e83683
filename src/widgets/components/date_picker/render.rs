use super::*;

const NAV_BACK: &str = "«";
const NAV_FORWARD: &str = "»";
const SIDE_LABEL_WIDTH: usize = 11;

fn first_line(output: DrawOutput) -> SpanLine {
    output.lines.into_iter().next().unwrap_or_default()
}

/// Places two column blocks next to each other.
fn side_by_side(left: DrawOutput, right: DrawOutput, gap: &str) -> Vec<SpanLine> {
    let height = left.lines.len().max(right.lines.len());
    let mut left = left.lines.into_iter();
    let mut right = right.lines.into_iter();
    (0..height)
        .map(|_| {
            let mut line = left.next().unwrap_or_default();
            line.push(Span::new(gap).no_wrap());
            line.extend(right.next().unwrap_or_default());
            line
        })
        .collect()
}

impl DatePicker {
    fn nav_arrow(&self, ctx: &RenderContext, delta: i64) -> Span {
        let shown = self.panel == Panel::None && self.can_navigate(delta);
        let glyph = match (shown, delta < 0) {
            (false, _) => " ",
            (true, true) => NAV_BACK,
            (true, false) => NAV_FORWARD,
        };
        let style = if ctx.is_focused(Focus::Header.id()) {
            ctx.theme.accent().bold()
        } else {
            ctx.theme.secondary()
        };
        Span::styled(glyph, style).no_wrap()
    }

    fn header_line(&self, ctx: &RenderContext) -> SpanLine {
        let mut line = vec![self.nav_arrow(ctx, -1), Span::new(" ").no_wrap()];
        match self.layout {
            Layout::Compact => {
                let title = format!(
                    "{} {}",
                    capitalize(self.language.month_name(self.visible.month())),
                    self.visible.year()
                );
                let style = if ctx.is_focused(Focus::Header.id()) {
                    ctx.theme.focused()
                } else {
                    ctx.theme.plain().bold()
                };
                let width = if self.use_year_input {
                    GRID_WIDTH - 4 - YEAR_WHEEL_WIDTH - 3
                } else {
                    GRID_WIDTH - 4
                };
                line.push(Span::styled(centered(&title, width), style).no_wrap());
                if self.use_year_input {
                    line.push(Span::new(" ").no_wrap());
                    line.extend(first_line(self.year_input.draw(ctx)));
                }
            }
            Layout::Wide => {
                line.extend(self.month_wheel.inline_spans(ctx));
                line.push(Span::new(" ").no_wrap());
                if self.use_year_input {
                    line.extend(first_line(self.year_input.draw(ctx)));
                } else {
                    line.extend(self.year_wheel.inline_spans(ctx));
                }
            }
        }
        line.push(Span::new(" ").no_wrap());
        line.push(self.nav_arrow(ctx, 1));
        line
    }

    fn month_year_panel(&self, ctx: &RenderContext) -> Vec<SpanLine> {
        let muted = ctx.theme.muted();
        let mut lines = vec![vec![
            Span::styled(
                centered(self.language.label(Label::SelectMonth), MONTH_WHEEL_WIDTH + 2),
                muted,
            )
            .no_wrap(),
            Span::new("  ").no_wrap(),
            Span::styled(self.language.label(Label::SelectYear), muted).no_wrap(),
        ]];
        lines.extend(side_by_side(
            self.month_wheel.draw(ctx),
            self.year_wheel.draw(ctx),
            "  ",
        ));
        lines
    }

    fn field_line(&self, side: Side, ctx: &RenderContext) -> SpanLine {
        let fields = self.fields(side);
        let mut line = Vec::new();

        let label = if self.sides().len() > 1 {
            let label = match side {
                Side::Start => Label::Beginning,
                Side::End => Label::End,
            };
            Some(capitalize(self.language.label(label)))
        } else if !self.mode.has_calendar() {
            Some(self.language.label(Label::Time).to_string())
        } else {
            None
        };
        if let Some(label) = label {
            let label = format!("{:<width$}", label, width = SIDE_LABEL_WIDTH);
            line.push(Span::styled(label, ctx.theme.muted()).no_wrap());
        }

        if self.mode.has_calendar() {
            line.extend(first_line(fields.date.draw(ctx)));
        }
        if self.mode.has_time() {
            line.push(Span::new(" ").no_wrap());
            match self.layout {
                Layout::Compact => {
                    let time = self
                        .selection
                        .get(side)
                        .map(DateTime::time_key)
                        .unwrap_or_default();
                    let focused = ctx.is_focused(Focus::TimeToggle(side).id());
                    let time = format!(" {} ", time);
                    line.push(Span::styled(time, ctx.theme.field(focused)).no_wrap());
                }
                Layout::Wide => {
                    line.extend(first_line(fields.hour_text.draw(ctx)));
                    line.push(Span::styled(":", ctx.theme.secondary()).no_wrap());
                    line.extend(first_line(fields.minute_text.draw(ctx)));
                }
            }
        }
        line
    }

    fn time_panel(&self, side: Side, ctx: &RenderContext) -> Vec<SpanLine> {
        let fields = self.fields(side);
        let mut lines = vec![vec![
            Span::styled(self.language.label(Label::Time), ctx.theme.muted()).no_wrap(),
        ]];
        lines.extend(side_by_side(
            fields.hour_wheel.draw(ctx),
            fields.minute_wheel.draw(ctx),
            " ",
        ));
        lines
    }

    fn button(&self, ctx: &RenderContext, focus: Focus, label: Label) -> Span {
        let style = if ctx.is_focused(focus.id()) {
            ctx.theme.focused()
        } else {
            ctx.theme.accent().bold()
        };
        Span::styled(format!("[ {} ]", self.language.label(label)), style).no_wrap()
    }

    fn button_line(&self, ctx: &RenderContext) -> SpanLine {
        if self.panel != Panel::None {
            return vec![self.button(ctx, Focus::Select, Label::Select)];
        }
        vec![
            self.button(ctx, Focus::Cancel, Label::Cancel),
            Span::new("  ").no_wrap(),
            self.button(ctx, Focus::Ok, Label::Ok),
        ]
    }
}

impl Drawable for DatePicker {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        if !self.base.is_visible() {
            return DrawOutput::default();
        }
        let ctx = ctx.with_focus(Some(self.focus.id()));
        let mut out = DrawOutput::default();

        if self.mode.has_calendar() {
            out.lines.push(self.header_line(&ctx));
            if self.panel == Panel::MonthYear {
                out.lines.extend(self.month_year_panel(&ctx));
            } else {
                out.extend(self.calendar.draw(&ctx));
            }
        }

        if self.panel != Panel::MonthYear {
            if self.mode.uses_selection() {
                for side in self.sides() {
                    out.lines.push(self.field_line(side, &ctx));
                    if self.panel == Panel::Time(side) {
                        out.lines.extend(self.time_panel(side, &ctx));
                    }
                }
            }
            if self.mode == PickerMode::WorkingDays {
                out.extend(self.counter.draw(&ctx));
            }
        }

        if !self.tabs.is_empty() {
            out.lines.push(Vec::new());
            out.extend(self.tabs.draw(&ctx));
        }
        out.lines.push(Vec::new());
        out.lines.push(self.button_line(&ctx));
        out
    }
}
