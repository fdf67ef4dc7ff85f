//! Terminal-independent text engine for the value pane and editor:
//! wrapping, cursor mapping, JSON tokenizing and the edit buffer.

mod buffer;
mod cursor;
mod highlight;
mod wrap;

pub use buffer::TextBuffer;
pub use cursor::{clamp_cursor, scroll_to_cursor, to_logical, to_visual, VisualPos};
pub use highlight::{row_pieces, tokenize, Piece, Token, TokenKind};
pub use wrap::{cell_width, fit_len, layout_lines, wrap_line, wrap_segments, VisualLine};
