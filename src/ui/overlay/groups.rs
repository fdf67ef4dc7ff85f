use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::theme::Theme;

use super::{centered_rect, overlay_block};

/// Key counts per prefix group, largest first.
pub fn render_groups(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);

    let groups = &app.groups;
    let title = if groups.loading {
        "Key Groups (counting...)".to_string()
    } else {
        format!("Key Groups ({})", groups.counts.len())
    };
    let block = overlay_block(&title, Theme::border_active());

    let lines: Vec<Line> = if let Some(err) = &groups.error {
        vec![Line::from(Span::styled(
            format!("  {err}"),
            Style::default().fg(Theme::status_error()),
        ))]
    } else if groups.loading {
        vec![Line::from(Span::styled(
            "  Counting keys...",
            Style::default().fg(Theme::fg_dim()),
        ))]
    } else if groups.counts.is_empty() {
        vec![Line::from(Span::styled(
            "  No keys",
            Style::default().fg(Theme::fg_dim()),
        ))]
    } else {
        let label_width = groups
            .counts
            .iter()
            .map(|g| g.label.chars().count())
            .max()
            .unwrap_or(0);
        groups
            .counts
            .iter()
            .skip(groups.scroll)
            .map(|g| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<label_width$}  ", g.label),
                        Style::default().fg(Theme::fg()),
                    ),
                    Span::styled(
                        g.count.to_string(),
                        Style::default()
                            .fg(Theme::border_active())
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
