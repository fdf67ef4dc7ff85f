use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::theme::Theme;
use crate::app::{App, Mode};

const BROWSE_HINTS: &[(&str, &str)] = &[
    ("↑↓", "move"),
    ("enter", "view"),
    ("/", "filter"),
    ("t/h/b/j", "format"),
    ("e", "edit"),
    ("d", "delete"),
    ("p", "pattern"),
    ("g", "groups"),
    ("F1", "about"),
    ("q", "quit"),
];

const VALUE_HINTS: &[(&str, &str)] = &[
    ("↑↓", "scroll"),
    ("t/h/b/j", "format"),
    ("e", "edit"),
    ("d", "delete"),
    ("y", "copy"),
    ("esc", "back"),
];

/// Key hints for whatever currently owns the keyboard.
fn hints(app: &App) -> &'static [(&'static str, &'static str)] {
    if app.show_about || app.groups.visible {
        return &[("esc", "close")];
    }
    match app.mode {
        Mode::Browsing if app.filter.is_typing() => &[("enter", "apply"), ("esc", "clear")],
        Mode::Browsing => BROWSE_HINTS,
        Mode::ValueFocused => VALUE_HINTS,
        Mode::Editing => &[("ctrl+s", "save"), ("esc", "cancel")],
        Mode::PatternDeletePrompt => &[("enter", "confirm"), ("esc", "cancel")],
        Mode::ConfirmSingleDelete(_) | Mode::ConfirmPatternDelete(_) => {
            &[("y", "confirm"), ("n", "cancel")]
        }
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default()
        .fg(Theme::border_active())
        .add_modifier(Modifier::BOLD);
    let sep_style = Style::default().fg(Theme::border_dim());
    let desc_style = Style::default().fg(Theme::fg());

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints(app).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", sep_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {desc}"), desc_style));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Theme::header_bg()));
    frame.render_widget(paragraph, area);
}
