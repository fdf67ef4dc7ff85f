mod footer;
mod header;
mod keys;
pub mod layout;
mod overlay;
mod status;
pub mod theme;
mod value;


use ratatui::widgets::{Block, BorderType, Borders};
use ratatui::Frame;

use crate::app::{App, Mode};
use theme::Theme;

/// Bordered pane; the focused one gets the active border color.
pub(crate) fn pane_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused {
        Theme::border_active()
    } else {
        Theme::border_dim()
    };
    Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style(color))
}

pub fn render(frame: &mut Frame, app: &App) {
    let areas = layout::compute_layout(frame.area());

    header::render(frame, app, areas.header);
    keys::render(frame, app, areas.keys);
    match &app.edit {
        Some(edit) => value::render_editor(frame, edit, areas.value),
        None => value::render(frame, app, areas.value),
    }
    status::render(frame, app, areas.status);
    footer::render(frame, app, areas.footer);

    // Overlays
    match &app.mode {
        Mode::ConfirmSingleDelete(key) => overlay::render_confirm_delete(frame, key, frame.area()),
        Mode::ConfirmPatternDelete(pattern) => {
            overlay::render_confirm_pattern(frame, pattern, frame.area());
        }
        _ => {}
    }
    if app.groups.visible {
        overlay::render_groups(frame, app, frame.area());
    }
    if app.show_about {
        overlay::render_about(frame, frame.area());
    }
}
