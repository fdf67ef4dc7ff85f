use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::theme::Theme;

use super::{centered_rect, overlay_block, separator_line};

// " key " on a colored background
fn button(key: &str, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {key} "),
        Style::default()
            .fg(Theme::overlay_bg())
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )
}

fn confirm_cancel_buttons(confirm_color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        button("y", confirm_color),
        Span::styled(" delete    ", Style::default().fg(Theme::fg_dim())),
        button("n", Theme::border_dim()),
        Span::styled(" cancel", Style::default().fg(Theme::fg_dim())),
    ])
}

fn render_dialog(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let popup = centered_rect(60, 40, area);
    frame.render_widget(Clear, popup);

    let block = overlay_block(title, Theme::status_error());
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup);
}

fn subject_line(prefix: &str, subject: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {prefix} "), Style::default().fg(Theme::fg())),
        Span::styled(
            format!("'{subject}'"),
            Style::default()
                .fg(Theme::status_error())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("?", Style::default().fg(Theme::fg())),
    ])
}

pub fn render_confirm_delete(frame: &mut Frame, key: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        subject_line("Delete key", key),
        Line::from(""),
        separator_line(),
        confirm_cancel_buttons(Theme::status_error()),
    ];
    render_dialog(frame, area, "Delete Key", lines);
}

pub fn render_confirm_pattern(frame: &mut Frame, pattern: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        subject_line("Delete every key matching", pattern),
        Line::from(""),
        Line::from(Span::styled(
            "  The whole keyspace is scanned; this cannot be undone.",
            Style::default().fg(Theme::status_warn()),
        )),
        separator_line(),
        confirm_cancel_buttons(Theme::status_error()),
    ];
    render_dialog(frame, area, "Delete By Pattern", lines);
}
