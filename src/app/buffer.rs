/// Ordered lines of bytes with a dirty flag.
///
/// Every mutating operation is bounds-checked and silently does nothing when
/// the position is invalid. Columns are byte offsets; bytes above 0x7f are
/// stored as opaque content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<Vec<u8>>,
    dirty: bool,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            dirty: false,
        }
    }

    /// Inserts `ch` at `col`, appending when `col` is past the end of the line.
    pub fn insert_char(&mut self, col: usize, row: usize, ch: u8) {
        if ch == b'\n' {
            return;
        }
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let col = col.min(line.len());
        line.insert(col, ch);
        self.dirty = true;
    }

    pub fn delete_char(&mut self, col: usize, row: usize) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        if col >= line.len() {
            return;
        }
        line.remove(col);
        self.dirty = true;
    }

    /// Splits the line at `col`; the tail becomes a new line right after it.
    pub fn insert_newline(&mut self, col: usize, row: usize) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let col = col.min(line.len());
        let tail = line.split_off(col);
        self.lines.insert(row + 1, tail);
        self.dirty = true;
    }

    /// Removes the line, or clears it when it is the only one left.
    pub fn delete_line(&mut self, row: usize) {
        if row >= self.lines.len() {
            return;
        }
        if self.lines.len() > 1 {
            self.lines.remove(row);
        } else {
            self.lines[0].clear();
        }
        self.dirty = true;
    }

    pub fn get_line(&self, row: usize) -> &[u8] {
        self.lines.get(row).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.get_line(row).len()
    }

    /// Replaces the line at `row`, growing the buffer with empty lines first
    /// when `row` is past the end. Anything from the first `\n` on is dropped.
    pub fn set_line(&mut self, row: usize, content: impl Into<Vec<u8>>) {
        let mut content = content.into();
        if let Some(pos) = content.iter().position(|&b| b == b'\n') {
            content.truncate(pos);
        }
        while row >= self.lines.len() {
            self.lines.push(Vec::new());
        }
        self.lines[row] = content;
        self.dirty = true;
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push(Vec::new());
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }
}
