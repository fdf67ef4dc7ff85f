use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// One rendered row of a wrapped document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualLine {
    /// Row text, with hanging spaces that overflow the width trimmed off.
    pub text: String,
    /// 1-based logical line number, set only on the first row of a line.
    pub source_line_number: Option<usize>,
    /// 0-based logical line this row belongs to.
    pub line: usize,
    /// Char range of the logical line covered by this row.
    pub range: Range<usize>,
}

impl VisualLine {
    pub fn char_len(&self) -> usize {
        self.range.len()
    }
}

/// Terminal cells a char occupies. Tabs count as one cell since the
/// renderer draws them as a space.
pub fn cell_width(c: char) -> usize {
    if c == '\t' {
        1
    } else {
        c.width().unwrap_or(0)
    }
}

fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split one logical line into contiguous char ranges, one per visual row.
///
/// Greedy by cell width. Spaces after a word stay on that word's row even
/// when they overflow it, so every char belongs to exactly one row and the
/// cursor can sit on any of them. Words wider than `width` are hard-broken.
/// A width of 0 disables wrapping.
pub fn wrap_segments(chars: &[char], width: usize) -> Vec<Range<usize>> {
    if width == 0 {
        return vec![0..chars.len()];
    }
    let mut rows = Vec::new();
    let mut start = 0;
    let mut row_w = 0;
    let mut i = 0;
    while i < chars.len() {
        while i < chars.len() && is_space(chars[i]) {
            row_w += cell_width(chars[i]);
            i += 1;
        }
        let word_start = i;
        while i < chars.len() && !is_space(chars[i]) {
            i += 1;
        }
        if word_start == i {
            break;
        }
        let word_w: usize = chars[word_start..i].iter().map(|&c| cell_width(c)).sum();
        if word_start > start && row_w + word_w > width {
            rows.push(start..word_start);
            start = word_start;
            row_w = 0;
        }
        for (idx, &c) in chars.iter().enumerate().take(i).skip(word_start) {
            let w = cell_width(c);
            if idx > start && row_w + w > width {
                rows.push(start..idx);
                start = idx;
                row_w = 0;
            }
            row_w += w;
        }
    }
    rows.push(start..chars.len());
    rows
}

/// How many leading chars of a row fit in `width` cells. Only hanging
/// spaces (or a single over-wide glyph) can overflow, so this only ever
/// drops trailing cells. A width of 0 keeps everything.
pub fn fit_len(chars: &[char], width: usize) -> usize {
    if width == 0 {
        return chars.len();
    }
    let mut used = 0;
    chars
        .iter()
        .take_while(|&&c| {
            used += cell_width(c);
            used <= width
        })
        .count()
}

fn fit(chars: &[char], width: usize) -> String {
    chars[..fit_len(chars, width)].iter().collect()
}

/// Wrap a single line into the strings shown on each row.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    wrap_segments(&chars, width)
        .into_iter()
        .map(|r| fit(&chars[r], width))
        .collect()
}

/// Wrap every logical line of a document into visual rows.
pub fn layout_lines<L: AsRef<[char]>>(lines: &[L], width: usize) -> Vec<VisualLine> {
    let mut out = Vec::with_capacity(lines.len());
    for (line_idx, line) in lines.iter().enumerate() {
        let chars = line.as_ref();
        for (seg_idx, range) in wrap_segments(chars, width).into_iter().enumerate() {
            out.push(VisualLine {
                text: fit(&chars[range.clone()], width),
                source_line_number: (seg_idx == 0).then_some(line_idx + 1),
                line: line_idx,
                range,
            });
        }
    }
    out
}
