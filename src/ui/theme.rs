use parking_lot::{const_rwlock, RwLock};
use ratatui::style::{Color, Modifier, Style};

use crate::app::StatusKind;
use crate::config::ThemeColors;
use crate::text::TokenKind;

static ACTIVE_THEME: RwLock<ThemeColors> = const_rwlock(ThemeColors::TOKYO_NIGHT);

pub fn set_theme(colors: ThemeColors) {
    *ACTIVE_THEME.write() = colors;
}

pub struct Theme;

impl Theme {
    pub fn header_bg() -> Color {
        ACTIVE_THEME.read().header_bg
    }

    pub fn fg() -> Color {
        ACTIVE_THEME.read().fg
    }

    pub fn fg_dim() -> Color {
        ACTIVE_THEME.read().fg_dim
    }

    pub fn border_active() -> Color {
        ACTIVE_THEME.read().border_active
    }

    pub fn border_dim() -> Color {
        ACTIVE_THEME.read().border_dim
    }

    pub fn status_ok() -> Color {
        ACTIVE_THEME.read().status_ok
    }

    pub fn status_warn() -> Color {
        ACTIVE_THEME.read().status_warn
    }

    pub fn status_error() -> Color {
        ACTIVE_THEME.read().status_error
    }

    pub fn overlay_bg() -> Color {
        ACTIVE_THEME.read().overlay_bg
    }

    pub fn highlight_bg() -> Color {
        ACTIVE_THEME.read().highlight_bg
    }

    pub fn gutter() -> Color {
        ACTIVE_THEME.read().gutter
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Self::fg())
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(color: Color) -> Style {
        Style::default().fg(color)
    }

    pub fn status_color(kind: StatusKind) -> Color {
        match kind {
            StatusKind::Info => Self::fg_dim(),
            StatusKind::Ok => Self::status_ok(),
            StatusKind::Warn => Self::status_warn(),
            StatusKind::Error => Self::status_error(),
        }
    }

    pub fn token_style(kind: TokenKind) -> Style {
        let theme = ACTIVE_THEME.read();
        let color = match kind {
            TokenKind::Key => theme.json_key,
            TokenKind::String => theme.json_string,
            TokenKind::Number => theme.json_number,
            TokenKind::Bool => theme.json_bool,
            TokenKind::Null => theme.json_null,
            TokenKind::Punct => theme.json_punct,
            TokenKind::Plain => theme.fg,
        };
        let style = Style::default().fg(color);
        if kind == TokenKind::Key {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Style for the editor's cursor cell, layered over the token style.
    pub fn cursor_style(base: Style) -> Style {
        base.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED)
    }
}
