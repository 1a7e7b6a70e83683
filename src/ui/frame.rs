use crate::terminal::CursorPos;
use crate::ui::span::SpanLine;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

impl RenderFrame {
    /// Plain text of every line, styles dropped.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect())
            .collect()
    }
}
