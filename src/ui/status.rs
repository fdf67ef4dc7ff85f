use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::theme::Theme;
use crate::app::{App, Mode};

/// Outcome of the last operation, or the pattern being typed.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.mode == Mode::PatternDeletePrompt {
        Line::from(vec![
            Span::styled(
                " Delete pattern: ",
                Style::default()
                    .fg(Theme::status_warn())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(app.pattern_input.clone(), Style::default().fg(Theme::fg())),
            Span::styled(" ", Theme::cursor_style(Style::default().fg(Theme::fg()))),
        ])
    } else {
        let status = &app.feedback.status;
        Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(Theme::status_color(status.kind)),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
