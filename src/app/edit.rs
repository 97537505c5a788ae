use super::App;

impl App {
    pub(super) fn insert_byte(&mut self, byte: u8) {
        self.buffer.insert_char(self.cursor.col, self.cursor.row, byte);
        self.cursor.col += 1;
    }

    /// Tab inserts `tab_width` spaces; there are no literal tab stops.
    pub(super) fn insert_tab(&mut self) {
        let width = self.settings.tab_width;
        for _ in 0..width {
            self.insert_byte(b' ');
        }
        if self.settings.debug_mode {
            self.set_status(format!("Tab: inserted {} spaces", width));
        }
    }

    pub(super) fn insert_newline(&mut self) {
        self.buffer.insert_newline(self.cursor.col, self.cursor.row);
        self.cursor.row += 1;
        self.cursor.col = 0;
        if !self.settings.auto_indent {
            return;
        }
        let indent: Vec<u8> = self
            .buffer
            .get_line(self.cursor.row - 1)
            .iter()
            .copied()
            .take_while(|&b| b == b' ' || b == b'\t')
            .collect();
        for byte in indent {
            self.insert_byte(byte);
        }
    }

    pub(super) fn backspace(&mut self) {
        let row = self.cursor.row;
        if self.cursor.col > 0 {
            let width = smart_tab_width(
                self.buffer.get_line(row),
                self.cursor.col,
                self.settings.tab_width,
            );
            for _ in 0..width {
                self.cursor.col -= 1;
                self.buffer.delete_char(self.cursor.col, row);
            }
            if self.settings.debug_mode && width > 1 {
                self.set_status(format!("Deleted tab ({} spaces)", width));
            }
        } else if row > 0 {
            let mut joined = self.buffer.get_line(row - 1).to_vec();
            self.cursor.col = joined.len();
            joined.extend_from_slice(self.buffer.get_line(row));
            self.buffer.set_line(row - 1, joined);
            self.buffer.delete_line(row);
            self.cursor.row -= 1;
        }
    }

    /// Deletes under the cursor, or pulls the next line up at end of line.
    pub(super) fn delete_forward(&mut self) {
        let row = self.cursor.row;
        let len = self.buffer.line_len(row);
        if self.cursor.col < len {
            self.buffer.delete_char(self.cursor.col, row);
        } else if row + 1 < self.buffer.line_count() {
            let mut joined = self.buffer.get_line(row).to_vec();
            joined.extend_from_slice(self.buffer.get_line(row + 1));
            self.buffer.set_line(row, joined);
            self.buffer.delete_line(row + 1);
        }
    }
}

/// How many bytes one backspace removes at `col`.
///
/// A full `tab_width` of spaces goes at once when the cursor sits right after
/// such a run and the leading spaces before the run are a whole number of
/// tab widths. Otherwise one byte.
pub(super) fn smart_tab_width(line: &[u8], col: usize, tab_width: usize) -> usize {
    if tab_width <= 1 || col < tab_width || col > line.len() {
        return 1;
    }
    let start = col - tab_width;
    if !line[start..col].iter().all(|&b| b == b' ') {
        return 1;
    }
    let leading = line[..start].iter().take_while(|&&b| b == b' ').count();
    if leading % tab_width == 0 { tab_width } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Settings;
    use crate::app::types::ScreenSize;

    fn app_with(lines: &[&str], col: usize, row: usize) -> App {
        let mut app = App::new(Settings::default(), ScreenSize { rows: 20, cols: 80 });
        for (i, line) in lines.iter().enumerate() {
            app.buffer.set_line(i, line.as_bytes());
        }
        app.buffer.set_dirty(false);
        app.cursor.col = col;
        app.cursor.row = row;
        app
    }

    fn text(app: &App) -> Vec<String> {
        app.buffer
            .lines()
            .iter()
            .map(|l| String::from_utf8_lossy(l).into_owned())
            .collect()
    }

    #[test]
    fn smart_tab_width_rules() {
        assert_eq!(smart_tab_width(b"        ", 8, 4), 4);
        assert_eq!(smart_tab_width(b"        ", 6, 4), 1);
        assert_eq!(smart_tab_width(b"    ", 4, 4), 4);
        assert_eq!(smart_tab_width(b"   ", 3, 4), 1);
        // The leading run is counted from column 0, so text before the
        // spaces gives a run of zero.
        assert_eq!(smart_tab_width(b"ab    ", 6, 4), 4);
        assert_eq!(smart_tab_width(b"  ab    ", 8, 4), 1);
        assert_eq!(smart_tab_width(b"  x ", 4, 4), 1);
        assert_eq!(smart_tab_width(b"        ", 8, 1), 1);
    }

    #[test]
    fn backspace_removes_a_whole_tab_stop() {
        let mut app = app_with(&["        "], 8, 0);
        app.backspace();
        assert_eq!(app.cursor.col, 4);
        assert_eq!(text(&app), vec!["    "]);
        assert!(app.buffer.is_dirty());
    }

    #[test]
    fn backspace_off_a_tab_stop_removes_one_space() {
        let mut app = app_with(&["        "], 6, 0);
        app.backspace();
        assert_eq!(app.cursor.col, 5);
        assert_eq!(text(&app), vec!["       "]);
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut app = app_with(&["abc", "def", "ghi"], 0, 1);
        app.backspace();
        assert_eq!(text(&app), vec!["abcdef", "ghi"]);
        assert_eq!((app.cursor.col, app.cursor.row), (3, 0));
    }

    #[test]
    fn backspace_at_buffer_start_does_nothing() {
        let mut app = app_with(&["abc"], 0, 0);
        app.backspace();
        assert_eq!(text(&app), vec!["abc"]);
        assert!(!app.buffer.is_dirty());
    }

    #[test]
    fn delete_joins_next_line_at_end_of_line() {
        let mut app = app_with(&["abc", "def"], 3, 0);
        app.delete_forward();
        assert_eq!(text(&app), vec!["abcdef"]);
        assert_eq!((app.cursor.col, app.cursor.row), (3, 0));
        app.delete_forward();
        assert_eq!(text(&app), vec!["abcef"]);
    }

    #[test]
    fn delete_at_end_of_last_line_does_nothing() {
        let mut app = app_with(&["abc"], 3, 0);
        app.delete_forward();
        assert_eq!(text(&app), vec!["abc"]);
        assert!(!app.buffer.is_dirty());
    }

    #[test]
    fn tab_inserts_spaces() {
        let mut app = app_with(&["x"], 0, 0);
        app.insert_tab();
        assert_eq!(text(&app), vec!["    x"]);
        assert_eq!(app.cursor.col, 4);
    }

    #[test]
    fn debug_mode_reports_tab_insert_and_removal() {
        let mut app = app_with(&[""], 0, 0);
        app.settings.debug_mode = true;
        app.insert_tab();
        assert_eq!(app.status_message, "Tab: inserted 4 spaces");
        app.backspace();
        assert_eq!(app.status_message, "Deleted tab (4 spaces)");
        assert_eq!(app.cursor.col, 0);
        assert_eq!(text(&app), vec![""]);
    }

    #[test]
    fn tab_diagnostics_stay_quiet_without_debug_mode() {
        let mut app = app_with(&[""], 0, 0);
        app.insert_tab();
        app.backspace();
        assert_eq!(app.status_message, "");
    }

    #[test]
    fn newline_copies_leading_whitespace() {
        let mut app = app_with(&[" \t  foo bar"], 8, 0);
        app.insert_newline();
        assert_eq!(text(&app), vec![" \t  foo ", " \t  bar"]);
        assert_eq!((app.cursor.col, app.cursor.row), (4, 1));
    }

    #[test]
    fn newline_without_auto_indent() {
        let mut app = app_with(&["    foo"], 7, 0);
        app.settings.auto_indent = false;
        app.insert_newline();
        assert_eq!(text(&app), vec!["    foo", ""]);
        assert_eq!((app.cursor.col, app.cursor.row), (0, 1));
    }
}
