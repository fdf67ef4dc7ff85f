use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::theme::Theme;
use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let sep = || Span::styled(" │ ", Style::default().fg(Theme::border_dim()));
    let text = |s: String| Span::styled(s, Style::default().fg(Theme::fg()));

    let more = if app.browser.has_more() { "+" } else { "" };
    let mut spans = vec![
        Span::styled(
            " kvpeek ",
            Style::default()
                .fg(Theme::border_active())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Theme::border_dim())),
        text(app.source.clone()),
        sep(),
        text(format!("keys: {}{more}", app.browser.len())),
        sep(),
        text(format!("format: {}", app.format.label())),
    ];

    if app.filter.is_active() {
        spans.push(sep());
        spans.push(text(format!("filter: {}", app.filter.term())));
        if let Some(err) = &app.filter.count_error {
            spans.push(Span::styled(
                format!(" (count failed: {err})"),
                Style::default().fg(Theme::status_error()),
            ));
        } else if app.filter.count_loading {
            spans.push(Span::styled(
                " (counting...)",
                Style::default().fg(Theme::fg_dim()),
            ));
        } else if let Some(n) = app.filter.match_count {
            spans.push(text(format!(" ({n} matches)")));
        }
    }

    spans.push(sep());
    spans.push(Span::styled(
        app.mode.label(),
        Style::default()
            .fg(Theme::border_active())
            .add_modifier(Modifier::BOLD),
    ));

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Theme::header_bg()));
    frame.render_widget(paragraph, area);
}
