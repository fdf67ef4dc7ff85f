use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

use crate::ui::theme::Theme;

use super::{centered_rect, overlay_block, section_header};

pub fn render_about(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);

    let title = format!("kvpeek {}  [Esc] close", env!("CARGO_PKG_VERSION"));
    let block = overlay_block(&title, Theme::border_active());

    let key_style = Style::default()
        .fg(Theme::border_active())
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Theme::fg());

    let entry = |key: &str, desc: &str| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("    {key:<14}"), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Browse, inspect and edit the records of a key-value store.",
            Style::default().fg(Theme::fg_dim()),
        )),
        Line::from(""),
        section_header("Keys"),
        entry("↑↓ PgUp PgDn", "Move selection"),
        entry("Home / End", "First / last loaded key"),
        entry("Enter", "Focus the value"),
        entry("/", "Fuzzy filter (Enter apply, Esc clear)"),
        entry("r", "Reload keys"),
        entry("y", "Copy key (value when focused)"),
        entry("q / Esc", "Quit"),
        Line::from(""),
        section_header("Values"),
        entry("t h b j", "Text / hex / base64 / JSON"),
        entry("e", "Edit value (Ctrl+S save, Esc cancel)"),
        entry("d / Delete", "Delete key"),
        entry("p", "Delete keys matching a glob"),
        entry("g", "Key counts by prefix"),
        Line::from(""),
        section_header("General"),
        entry("T", "Cycle color theme"),
        entry("F1", "Toggle this screen"),
        entry("Ctrl+C", "Quit"),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
