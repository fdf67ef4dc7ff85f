/// Multi-line edit buffer with a logical `(line, col)` cursor.
///
/// Columns count chars, not bytes or cells. The buffer always holds at
/// least one (possibly empty) line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<Vec<char>>,
    line: usize,
    col: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![Vec::new()],
            line: 0,
            col: 0,
        }
    }
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        let lines = text.split('\n').map(|l| l.chars().collect()).collect();
        Self {
            lines,
            line: 0,
            col: 0,
        }
    }

    pub fn value(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter());
        }
        out
    }

    pub fn lines(&self) -> &[Vec<char>] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub const fn cursor(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    /// Move the cursor, clamping to the buffer.
    pub fn set_cursor(&mut self, line: usize, col: usize) {
        self.line = line.min(self.lines.len() - 1);
        self.col = col.min(self.current().len());
    }

    fn current(&self) -> &Vec<char> {
        &self.lines[self.line]
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        let col = self.col;
        self.lines[self.line].insert(col, c);
        self.col += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    pub fn newline(&mut self) {
        let col = self.col;
        let rest = self.lines[self.line].split_off(col);
        self.lines.insert(self.line + 1, rest);
        self.line += 1;
        self.col = 0;
    }

    /// Delete before the cursor, joining with the previous line at column 0.
    pub fn backspace(&mut self) -> bool {
        if self.col > 0 {
            self.col -= 1;
            let col = self.col;
            self.lines[self.line].remove(col);
            true
        } else if self.line > 0 {
            let tail = self.lines.remove(self.line);
            self.line -= 1;
            self.col = self.lines[self.line].len();
            self.lines[self.line].extend(tail);
            true
        } else {
            false
        }
    }

    /// Delete under the cursor, joining the next line at end of line.
    pub fn delete(&mut self) -> bool {
        let col = self.col;
        if col < self.current().len() {
            self.lines[self.line].remove(col);
            true
        } else if self.line + 1 < self.lines.len() {
            let next = self.lines.remove(self.line + 1);
            self.lines[self.line].extend(next);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.line > 0 {
            self.line -= 1;
            self.col = self.current().len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.current().len() {
            self.col += 1;
        } else if self.line + 1 < self.lines.len() {
            self.line += 1;
            self.col = 0;
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.current().len();
    }
}
