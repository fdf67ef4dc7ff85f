use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::layout;
use super::theme::Theme;
use crate::app::{App, EditSession};
use crate::codec::ValueFormat;
use crate::text::{
    clamp_cursor, fit_len, layout_lines, row_pieces, tokenize, Token, TokenKind, VisualLine,
};

fn dim(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(text, Style::default().fg(Theme::fg_dim())))
}

/// Spans for one visual row cut to `width` cells. `cursor` is the cursor
/// offset within the row.
fn row_spans(
    chars: &[char],
    tokens: &[Token],
    row: &VisualLine,
    cursor: Option<usize>,
    width: usize,
) -> Vec<Span<'static>> {
    let row_chars = &chars[row.range.clone()];
    let cursor = cursor.map(|c| clamp_cursor(row_chars, c, width));
    let row_chars = &row_chars[..fit_len(row_chars, width)];
    let visible = row.range.start..row.range.start + row_chars.len();
    row_pieces(tokens, visible, cursor)
        .into_iter()
        .map(|piece| {
            let style = Theme::token_style(piece.kind);
            if piece.cursor {
                // Past the last char the cursor sits on a blank cell.
                let cell = row_chars.get(piece.range.start).map_or(' ', |&c| {
                    if c == '\t' {
                        ' '
                    } else {
                        c
                    }
                });
                Span::styled(cell.to_string(), Theme::cursor_style(style))
            } else {
                let text: String = row_chars[piece.range]
                    .iter()
                    .map(|&c| if c == '\t' { ' ' } else { c })
                    .collect();
                Span::styled(text, style)
            }
        })
        .collect()
}

/// Tokens for a line: JSON classes when highlighting, one plain run otherwise.
fn line_tokens(chars: &[char], highlight: bool) -> Vec<Token> {
    if highlight {
        tokenize(chars)
    } else {
        vec![Token {
            kind: TokenKind::Plain,
            range: 0..chars.len(),
        }]
    }
}

/// Read-only value pane.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let value = &app.value;
    let title = match &value.key {
        Some(key) => format!(" {key} [{}] ", app.format.label()),
        None => " Value ".to_string(),
    };
    let block = super::pane_block(title, app.mode.value_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(err) = &value.error {
        let msg = Paragraph::new(Span::styled(
            err.clone(),
            Style::default().fg(Theme::status_error()),
        ));
        frame.render_widget(msg, inner);
        return;
    }
    let Some(display) = &value.display else {
        let msg = if value.is_loading() {
            "Loading..."
        } else {
            "Select a key to view its value."
        };
        frame.render_widget(dim(msg), inner);
        return;
    };

    if let Some(warning) = &display.warning {
        let warn = Paragraph::new(Span::styled(
            warning.clone(),
            Style::default().fg(Theme::status_warn()),
        ));
        frame.render_widget(warn, layout::take_top(inner, 1).0);
    }
    let text_area = layout::value_text(inner, display.warning.is_some());

    let lines = value.lines();
    let width = usize::from(text_area.width);
    let rows = layout_lines(&lines, width);
    let mut tokens: Vec<Option<Vec<Token>>> = vec![None; lines.len()];
    let rendered: Vec<Line> = rows
        .iter()
        .skip(value.scroll)
        .take(usize::from(text_area.height))
        .map(|row| {
            let chars = &lines[row.line];
            let toks = tokens[row.line].get_or_insert_with(|| line_tokens(chars, display.highlight));
            Line::from(row_spans(chars, toks, row, None, width))
        })
        .collect();
    frame.render_widget(Paragraph::new(rendered), text_area);
}

/// Editor in place of the value pane: gutter, wrapped text with the
/// cursor cell, and a message row for warnings or save errors.
pub fn render_editor(frame: &mut Frame, edit: &EditSession, area: Rect) {
    let marker = if edit.saving {
        " (saving...)"
    } else if edit.dirty {
        " *"
    } else {
        ""
    };
    let title = format!(" Editing {} [{}]{marker} ", edit.key, edit.format.label());
    let block = super::pane_block(title, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let message = edit
        .error
        .as_ref()
        .map(|e| (e, Theme::status_error()))
        .or_else(|| edit.warning.as_ref().map(|w| (w, Theme::status_warn())));
    let lines = edit.buffer.lines();
    let areas = layout::editor_areas(inner, lines.len(), message.is_some());

    if let (Some((text, color)), Some(msg_area)) = (message, areas.message) {
        let msg = Paragraph::new(Span::styled(
            text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(msg, msg_area);
    }

    let rows = edit.rows(layout::editor_wrap_width(areas.text));
    let cursor = edit.cursor_visual(&rows);
    let highlight = edit.format == ValueFormat::Json;
    let number_width = usize::from(areas.gutter.width.saturating_sub(1));
    let cells = usize::from(areas.text.width);

    let mut tokens: Vec<Option<Vec<Token>>> = vec![None; lines.len()];
    let mut gutter = Vec::new();
    let mut text = Vec::new();
    for (idx, row) in rows
        .iter()
        .enumerate()
        .skip(edit.scroll)
        .take(usize::from(areas.text.height))
    {
        let number = row
            .source_line_number
            .map_or_else(String::new, |n| n.to_string());
        gutter.push(Line::from(Span::styled(
            format!("{number:>number_width$} "),
            Style::default().fg(Theme::gutter()),
        )));

        let chars = &lines[row.line];
        let toks = tokens[row.line].get_or_insert_with(|| line_tokens(chars, highlight));
        let at = (idx == cursor.row).then_some(cursor.offset);
        text.push(Line::from(row_spans(chars, toks, row, at, cells)));
    }
    frame.render_widget(Paragraph::new(gutter), areas.gutter);
    frame.render_widget(Paragraph::new(text), areas.text);
}
