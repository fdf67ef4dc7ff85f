use super::wrap::{cell_width, fit_len, VisualLine};

/// Cursor position in wrapped rows: row index and char offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualPos {
    pub row: usize,
    pub offset: usize,
}

/// Map a logical `(line, col)` cursor onto the rows produced by
/// [`layout_lines`](super::layout_lines). A column that sits exactly on a
/// row boundary belongs to the later row, matching where typed text appears.
pub fn to_visual(rows: &[VisualLine], line: usize, col: usize) -> VisualPos {
    let idx = rows.partition_point(|r| (r.line, r.range.start) <= (line, col));
    let row = idx.saturating_sub(1);
    let offset = rows
        .get(row)
        .map_or(0, |r| col.saturating_sub(r.range.start).min(r.char_len()));
    VisualPos { row, offset }
}

/// Move a row offset back onto a cell that lies inside `width` cells.
///
/// Hanging spaces can push a row past the width, and the cursor may sit on
/// one of them. It is drawn on the last visible cell instead, or on the
/// blank cell after the text when that one still fits. A width of 0 keeps
/// the offset as is.
pub fn clamp_cursor(row: &[char], offset: usize, width: usize) -> usize {
    if width == 0 {
        return offset;
    }
    let visible = fit_len(row, width);
    if offset < visible {
        return offset;
    }
    let used: usize = row[..visible].iter().map(|&c| cell_width(c)).sum();
    if used < width {
        visible
    } else {
        visible.saturating_sub(1)
    }
}

/// Inverse of [`to_visual`]. Offsets past a row's end clamp to the last
/// position that still maps back onto the same row.
pub fn to_logical(rows: &[VisualLine], pos: VisualPos) -> (usize, usize) {
    let Some(r) = rows.get(pos.row) else {
        return rows.last().map_or((0, 0), |r| (r.line, r.range.end));
    };
    let continues = rows.get(pos.row + 1).is_some_and(|next| next.line == r.line);
    let max = if continues {
        r.char_len().saturating_sub(1)
    } else {
        r.char_len()
    };
    (r.line, r.range.start + pos.offset.min(max))
}

/// New top row so `cursor_row` is visible, moving the window as little as
/// possible and never past the last full page.
pub fn scroll_to_cursor(top: usize, cursor_row: usize, height: usize, total_rows: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let max_top = total_rows.saturating_sub(height);
    let top = if cursor_row < top {
        cursor_row
    } else if cursor_row >= top + height {
        cursor_row + 1 - height
    } else {
        top
    };
    top.min(max_top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::layout_lines;

    fn rows(lines: &[&str], width: usize) -> Vec<VisualLine> {
        let chars: Vec<Vec<char>> = lines.iter().map(|l| l.chars().collect()).collect();
        layout_lines(&chars, width)
    }

    #[test]
    fn maps_within_single_row() {
        let r = rows(&["hello"], 10);
        assert_eq!(to_visual(&r, 0, 3), VisualPos { row: 0, offset: 3 });
        assert_eq!(to_visual(&r, 0, 5), VisualPos { row: 0, offset: 5 });
    }

    #[test]
    fn boundary_column_moves_to_next_row() {
        // "hello " | "world"
        let r = rows(&["hello world"], 5);
        assert_eq!(to_visual(&r, 0, 5), VisualPos { row: 0, offset: 5 });
        assert_eq!(to_visual(&r, 0, 6), VisualPos { row: 1, offset: 0 });
        assert_eq!(to_visual(&r, 0, 11), VisualPos { row: 1, offset: 5 });
    }

    #[test]
    fn cursor_in_overflowing_spaces_stays_on_screen() {
        let line: Vec<char> = "ab        cd".chars().collect();
        let r = rows(&["ab        cd"], 4);
        let pos = to_visual(&r, 0, 8);
        assert_eq!(pos, VisualPos { row: 0, offset: 8 });
        let row = &line[r[0].range.clone()];
        assert_eq!(clamp_cursor(row, pos.offset, 5), 4);
        assert_eq!(clamp_cursor(row, pos.offset, 4), 3);
        assert_eq!(clamp_cursor(row, 1, 5), 1);
    }

    #[test]
    fn cursor_after_short_row_keeps_blank_cell() {
        let row: Vec<char> = "ab".chars().collect();
        assert_eq!(clamp_cursor(&row, 2, 5), 2);
        assert_eq!(clamp_cursor(&row, 2, 2), 1);
        assert_eq!(clamp_cursor(&row, 7, 0), 7);
    }

    #[test]
    fn second_logical_line_rows() {
        let r = rows(&["abcdef", "xy"], 3);
        assert_eq!(to_visual(&r, 1, 0), VisualPos { row: 2, offset: 0 });
        assert_eq!(to_visual(&r, 1, 2), VisualPos { row: 2, offset: 2 });
    }

    #[test]
    fn empty_lines_map_to_their_row() {
        let r = rows(&["", "", "a"], 3);
        assert_eq!(to_visual(&r, 1, 0), VisualPos { row: 1, offset: 0 });
    }

    #[test]
    fn logical_round_trip() {
        let r = rows(&["hello world", "ab"], 5);
        for (line, col) in [(0, 0), (0, 4), (0, 6), (0, 11), (1, 2)] {
            assert_eq!(to_logical(&r, to_visual(&r, line, col)), (line, col));
        }
    }

    #[test]
    fn to_logical_clamps_offset() {
        let r = rows(&["abcdef", "x"], 3);
        assert_eq!(to_logical(&r, VisualPos { row: 0, offset: 9 }), (0, 2));
        assert_eq!(to_logical(&r, VisualPos { row: 1, offset: 9 }), (0, 6));
        assert_eq!(to_logical(&r, VisualPos { row: 2, offset: 9 }), (1, 1));
        assert_eq!(to_logical(&r, VisualPos { row: 7, offset: 0 }), (1, 1));
    }

    #[test]
    fn scroll_minimal_moves() {
        assert_eq!(scroll_to_cursor(0, 3, 5, 20), 0);
        assert_eq!(scroll_to_cursor(0, 5, 5, 20), 1);
        assert_eq!(scroll_to_cursor(10, 4, 5, 20), 4);
    }

    #[test]
    fn scroll_never_passes_last_page() {
        assert_eq!(scroll_to_cursor(18, 19, 5, 20), 15);
        assert_eq!(scroll_to_cursor(3, 1, 5, 3), 0);
        assert_eq!(scroll_to_cursor(4, 4, 0, 10), 0);
    }
}
