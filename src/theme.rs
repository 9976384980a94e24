use ratatui::style::{Color, Modifier, Style};

pub const THEME_NAMES: &[&str] = &["classic", "mono"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiPalette {
    pub header_fg: Color,
    pub header_bg: Color,
    pub value: Color,
    pub ascii: Color,
    pub status_fg: Color,
    pub status_bg: Color,
    pub hint: Color,
    pub search: Color,
    pub bookmark: Color,
    pub border: Color,
}

impl UiPalette {
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "mono" => Some(Self::mono()),
            _ => None,
        }
    }

    pub fn fallback_name() -> &'static str {
        THEME_NAMES[0]
    }

    fn classic() -> Self {
        Self {
            header_fg: Color::White,
            header_bg: Color::Blue,
            value: Color::Yellow,
            ascii: Color::Green,
            status_fg: Color::Black,
            status_bg: Color::White,
            hint: Color::Cyan,
            search: Color::Red,
            bookmark: Color::Magenta,
            border: Color::Cyan,
        }
    }

    fn mono() -> Self {
        Self {
            header_fg: Color::Reset,
            header_bg: Color::Reset,
            value: Color::Reset,
            ascii: Color::Gray,
            status_fg: Color::Reset,
            status_bg: Color::DarkGray,
            hint: Color::Gray,
            search: Color::White,
            bookmark: Color::White,
            border: Color::Gray,
        }
    }

    pub fn header(&self) -> Style {
        Style::default().fg(self.header_fg).bg(self.header_bg)
    }

    pub fn status(&self) -> Style {
        Style::default().fg(self.status_fg).bg(self.status_bg)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.hint)
    }

    /// Style of a single byte cell; later attributes override earlier ones.
    pub fn cell(&self, base: Color, bookmarked: bool, matched: bool, cursor: bool) -> Style {
        let mut style = Style::default().fg(base);
        if bookmarked {
            style = style.fg(self.bookmark).add_modifier(Modifier::UNDERLINED);
        }
        if matched {
            style = style.fg(self.search).add_modifier(Modifier::BOLD);
        }
        if cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }
}
