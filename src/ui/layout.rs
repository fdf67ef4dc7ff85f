use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Share of the body width given to the key list.
const KEYS_PERCENT: u16 = 38;
const MIN_GUTTER: u16 = 3;

pub struct LayoutAreas {
    pub header: Rect,
    pub keys: Rect,
    pub value: Rect,
    pub status: Rect,
    pub footer: Rect,
}

pub fn compute_layout(area: Rect) -> LayoutAreas {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(KEYS_PERCENT),
            Constraint::Percentage(100 - KEYS_PERCENT),
        ])
        .split(outer[1]);

    LayoutAreas {
        header: outer[0],
        keys: body[0],
        value: body[1],
        status: outer[2],
        footer: outer[3],
    }
}

/// Area inside a one-cell border.
pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Rows of the key list, below the filter line when one is shown.
pub fn key_rows(keys_inner: Rect, filter_line: bool) -> Rect {
    if filter_line {
        take_top(keys_inner, 1).1
    } else {
        keys_inner
    }
}

/// Split `n` rows off the top of `area`.
pub fn take_top(area: Rect, n: u16) -> (Rect, Rect) {
    let n = n.min(area.height);
    (
        Rect { height: n, ..area },
        Rect {
            y: area.y + n,
            height: area.height - n,
            ..area
        },
    )
}

/// Split `n` rows off the bottom of `area`.
pub fn take_bottom(area: Rect, n: u16) -> (Rect, Rect) {
    let n = n.min(area.height);
    (
        Rect {
            height: area.height - n,
            ..area
        },
        Rect {
            y: area.y + area.height - n,
            height: n,
            ..area
        },
    )
}

/// Text area of the read-only value pane; a warning takes one row plus a spacer.
pub fn value_text(value_inner: Rect, has_warning: bool) -> Rect {
    if has_warning {
        take_top(value_inner, 2).1
    } else {
        value_inner
    }
}

/// Line-number gutter width: digits of the line count plus one, at least 3.
pub fn gutter_width(line_count: usize) -> u16 {
    let digits = line_count.max(1).to_string().len() as u16;
    (digits + 1).max(MIN_GUTTER)
}

pub struct EditorAreas {
    pub gutter: Rect,
    pub text: Rect,
    pub message: Option<Rect>,
}

/// Editor layout inside the value pane. The last text column stays free so
/// the cursor can sit after the final char of a full row.
pub fn editor_areas(value_inner: Rect, line_count: usize, has_message: bool) -> EditorAreas {
    let (body, message) = if has_message {
        let (body, msg) = take_bottom(value_inner, 1);
        (body, Some(msg))
    } else {
        (value_inner, None)
    };
    let gutter_w = gutter_width(line_count).min(body.width);
    let gutter = Rect {
        width: gutter_w,
        ..body
    };
    let text = Rect {
        x: body.x + gutter_w,
        width: body.width - gutter_w,
        ..body
    };
    EditorAreas {
        gutter,
        text,
        message,
    }
}

/// Width passed to the wrapper for editor text.
pub fn editor_wrap_width(text: Rect) -> usize {
    usize::from(text.width.saturating_sub(1)).max(1)
}
