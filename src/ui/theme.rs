use crate::ui::style::{Color, Style};

const ACCENT_LIGHT: Color = Color::Rgb(0x04, 0x9A, 0x00);
const ACCENT_DARK: Color = Color::Rgb(0x87, 0xDC, 0x84);

/// How a single calendar cell should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayCell {
    pub selected: bool,
    pub in_range: bool,
    pub today: bool,
    pub weekend: bool,
    pub disabled: bool,
    pub cursor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    pub accent: Color,
}

impl Theme {
    pub fn new(dark: bool, accent: Option<Color>) -> Self {
        let default_accent = if dark { ACCENT_DARK } else { ACCENT_LIGHT };
        Self {
            dark,
            accent: accent.unwrap_or(default_accent),
        }
    }

    fn pick(&self, dark: Color, light: Color) -> Color {
        if self.dark { dark } else { light }
    }

    pub fn plain(&self) -> Style {
        Style::new().color(self.pick(Color::White, Color::Black))
    }

    pub fn muted(&self) -> Style {
        Style::new().color(self.pick(Color::Rgb(0xBA, 0xBA, 0xBA), Color::Rgb(0x99, 0x99, 0x99)))
    }

    pub fn secondary(&self) -> Style {
        Style::new().color(self.pick(Color::Rgb(0x88, 0x88, 0x88), Color::Rgb(0x77, 0x77, 0x77)))
    }

    pub fn error(&self) -> Style {
        Style::new().color(self.pick(Color::Rgb(0xE7, 0x80, 0x80), Color::Rgb(0xCC, 0x00, 0x00)))
    }

    pub fn border(&self) -> Style {
        Style::new().color(self.pick(Color::Rgb(0x31, 0x31, 0x31), Color::Rgb(0xDD, 0xDD, 0xDD)))
    }

    pub fn accent(&self) -> Style {
        Style::new().color(self.accent)
    }

    /// A focused control: accent, bold, underlined.
    pub fn focused(&self) -> Style {
        Style::new().color(self.accent).bold().underline()
    }

    pub fn field(&self, focused: bool) -> Style {
        if focused {
            self.focused()
        } else {
            self.plain()
        }
    }

    pub fn day(&self, cell: DayCell) -> Style {
        let mut style = if cell.selected {
            Style::new().color(Color::White).background(self.accent).bold()
        } else if cell.disabled {
            Style::new().color(Color::DarkGrey)
        } else if cell.today {
            Style::new().color(self.accent).bold()
        } else if cell.weekend {
            self.error()
        } else {
            self.plain()
        };

        if cell.in_range && !cell.selected {
            style = style.background(self.range_background());
        }
        if cell.cursor {
            style = style.underline().bold();
        }
        style
    }

    fn range_background(&self) -> Color {
        let base = self.pick(Color::Rgb(0x24, 0x24, 0x24), Color::Rgb(0xFF, 0xFF, 0xFF));
        blend(self.accent, base, 0x44)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(false, None)
    }
}

/// Mixes `top` over `base` with `alpha` out of 255. Named colours are
/// returned unchanged.
pub fn blend(top: Color, base: Color, alpha: u8) -> Color {
    match (top, base) {
        (Color::Rgb(tr, tg, tb), Color::Rgb(br, bg, bb)) => {
            let mix = |t: u8, b: u8| {
                let a = u16::from(alpha);
                ((u16::from(t) * a + u16::from(b) * (255 - a)) / 255) as u8
            };
            Color::Rgb(mix(tr, br), mix(tg, bg), mix(tb, bb))
        }
        (top, _) => top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_defaults_follow_dark_mode() {
        assert_eq!(Theme::new(false, None).accent, ACCENT_LIGHT);
        assert_eq!(Theme::new(true, None).accent, ACCENT_DARK);
        assert_eq!(Theme::new(true, Some(Color::Cyan)).accent, Color::Cyan);
    }

    #[test]
    fn selected_beats_weekend_and_disabled_beats_today() {
        let theme = Theme::default();
        let selected = theme.day(DayCell {
            selected: true,
            weekend: true,
            ..DayCell::default()
        });
        assert_eq!(selected.background, Some(theme.accent));

        let disabled = theme.day(DayCell {
            disabled: true,
            today: true,
            ..DayCell::default()
        });
        assert_eq!(disabled.color, Some(Color::DarkGrey));
    }

    #[test]
    fn blend_mixes_channels() {
        assert_eq!(blend(Color::Rgb(255, 0, 0), Color::Rgb(0, 0, 0), 255), Color::Rgb(255, 0, 0));
        assert_eq!(blend(Color::Rgb(255, 0, 0), Color::Rgb(0, 0, 0), 0), Color::Rgb(0, 0, 0));
        assert_eq!(blend(Color::Cyan, Color::Rgb(0, 0, 0), 10), Color::Cyan);
    }
}
