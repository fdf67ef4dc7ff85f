//! In-place value editor: a text buffer plus the wrap-aware cursor motion
//! and viewport that go with it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::codec::{self, CodecError, ValueFormat};
use crate::text::{layout_lines, scroll_to_cursor, to_logical, to_visual, TextBuffer, VisualLine, VisualPos};

const TAB: &str = "  ";

#[derive(Debug)]
pub struct EditSession {
    pub key: String,
    pub format: ValueFormat,
    pub buffer: TextBuffer,
    pub dirty: bool,
    /// Shown under the text while the session lasts, e.g. invalid JSON.
    pub warning: Option<String>,
    /// Last save error; cleared by the next edit.
    pub error: Option<String>,
    /// First visual row drawn.
    pub scroll: usize,
    pub saving: bool,
}

impl EditSession {
    /// Open an editor for `bytes` in `format`. Fails when the bytes have no
    /// faithful text form in that format.
    pub fn open(key: String, format: ValueFormat, bytes: &[u8]) -> Result<Self, CodecError> {
        let editable = codec::editable(format, bytes)?;
        Ok(Self {
            key,
            format,
            buffer: TextBuffer::from_text(&editable.text),
            dirty: false,
            warning: editable.warning,
            error: None,
            scroll: 0,
            saving: false,
        })
    }

    pub fn rows(&self, width: usize) -> Vec<VisualLine> {
        layout_lines(self.buffer.lines(), width)
    }

    pub fn cursor_visual(&self, rows: &[VisualLine]) -> VisualPos {
        let (line, col) = self.buffer.cursor();
        to_visual(rows, line, col)
    }

    /// Bytes to store for the current text.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode(self.format, &self.buffer.value())
    }

    /// Apply an editing key. `width` and `height` describe the text area.
    /// Returns false for keys the editor does not use.
    pub fn handle_key(&mut self, key: KeyEvent, width: usize, height: usize) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let changed = match key.code {
            KeyCode::Char(c) if !ctrl => {
                self.buffer.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.buffer.newline();
                true
            }
            KeyCode::Tab => {
                self.buffer.insert_str(TAB);
                true
            }
            KeyCode::Backspace => self.buffer.backspace(),
            KeyCode::Delete => self.buffer.delete(),
            KeyCode::Left => {
                self.buffer.move_left();
                false
            }
            KeyCode::Right => {
                self.buffer.move_right();
                false
            }
            KeyCode::Home => {
                self.buffer.move_home();
                false
            }
            KeyCode::End => {
                self.buffer.move_end();
                false
            }
            KeyCode::Up => {
                self.move_rows(-1, width);
                false
            }
            KeyCode::Down => {
                self.move_rows(1, width);
                false
            }
            KeyCode::PageUp => {
                self.move_rows(-(height.max(1) as isize), width);
                false
            }
            KeyCode::PageDown => {
                self.move_rows(height.max(1) as isize, width);
                false
            }
            _ => return false,
        };
        if changed {
            self.dirty = true;
            self.error = None;
        }
        self.ensure_visible(width, height);
        true
    }

    /// Move the cursor `delta` visual rows, keeping its offset within the row.
    fn move_rows(&mut self, delta: isize, width: usize) {
        let rows = self.rows(width);
        let pos = self.cursor_visual(&rows);
        let last = rows.len().saturating_sub(1);
        let target = pos.row.saturating_add_signed(delta).min(last);
        if target == pos.row {
            return;
        }
        let (line, col) = to_logical(
            &rows,
            VisualPos {
                row: target,
                offset: pos.offset,
            },
        );
        self.buffer.set_cursor(line, col);
    }

    pub fn ensure_visible(&mut self, width: usize, height: usize) {
        let rows = self.rows(width);
        let pos = self.cursor_visual(&rows);
        self.scroll = scroll_to_cursor(self.scroll, pos.row, height, rows.len());
    }
}
