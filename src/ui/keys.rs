use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::layout;
use super::theme::Theme;
use crate::app::{App, FilterMode};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_indices();
    let title = if app.filter.is_active() {
        format!(" Keys ({}/{}) ", visible.len(), app.browser.len())
    } else {
        format!(" Keys ({}) ", app.browser.len())
    };
    let block = super::pane_block(title, !app.mode.value_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let filter_line = app.filter.mode != FilterMode::Off;
    if filter_line {
        render_filter_line(frame, app, layout::take_top(inner, 1).0);
    }
    let rows = layout::key_rows(inner, filter_line);

    if visible.is_empty() {
        let msg = if app.browser.is_loading() {
            "Loading..."
        } else if app.filter.is_active() {
            "No matching keys"
        } else {
            "No keys"
        };
        let empty = Paragraph::new(Span::styled(msg, Style::default().fg(Theme::fg_dim())));
        frame.render_widget(empty, rows);
        return;
    }

    let keys = app.browser.keys();
    let lines: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(app.list.offset)
        .take(usize::from(rows.height))
        .map(|(pos, &idx)| {
            let key = keys[idx].as_str();
            if pos == app.list.selected {
                Line::from(Span::styled(
                    format!("▸ {key}"),
                    Style::default()
                        .fg(Theme::fg())
                        .bg(Theme::highlight_bg())
                        .add_modifier(Modifier::BOLD),
                ))
                .style(Style::default().bg(Theme::highlight_bg()))
            } else {
                Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default().fg(Theme::fg()),
                ))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), rows);
}

fn render_filter_line(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "/",
            Style::default()
                .fg(Theme::border_active())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.filter.input.clone(), Style::default().fg(Theme::fg())),
    ];
    if app.filter.is_typing() {
        spans.push(Span::styled(
            " ",
            Theme::cursor_style(Style::default().fg(Theme::fg())),
        ));
    } else if app.filter.loading_all && app.browser.has_more() {
        spans.push(Span::styled(
            "  scanning...",
            Style::default().fg(Theme::fg_dim()),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
