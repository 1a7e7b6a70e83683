use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;

const MARKER: &str = "◇  ";

/// Frames the picker body in the left gutter: a top corner, a marker on the
/// first line, a rail down the body and a closing corner.
pub fn decorate_modal(lines: &mut Vec<SpanLine>, cursor: &mut Option<CursorPos>, theme: &Theme) {
    let decor_style = theme.accent();

    let mut decorated = Vec::<SpanLine>::with_capacity(lines.len().saturating_add(2));
    decorated.push(vec![Span::styled("┌  ", decor_style).no_wrap()]);

    for (idx, line) in lines.drain(..).enumerate() {
        let prefix = if idx == 0 { MARKER } else { "│  " };
        let mut out_line = Vec::<Span>::with_capacity(line.len().saturating_add(1));
        out_line.push(Span::styled(prefix, decor_style).no_wrap());
        out_line.extend(line);
        decorated.push(out_line);
    }

    decorated.push(vec![Span::styled("└  ", decor_style).no_wrap()]);
    *lines = decorated;

    if let Some(cursor) = cursor {
        cursor.row = cursor.row.saturating_add(1);
        cursor.col = cursor.col.saturating_add(3);
    }
}
