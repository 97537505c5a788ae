use std::time::Instant;

use super::App;
use super::buffer::LineBuffer;
use super::types::Cursor;

/// Width of the `%4d ` line-number gutter.
pub const GUTTER_WIDTH: usize = 5;

/// Clamps the cursor into the buffer, then scrolls the least amount that
/// keeps it inside a `screen_rows` x `screen_cols` window.
pub fn scroll(cursor: &mut Cursor, buffer: &LineBuffer, screen_rows: usize, screen_cols: usize) {
    let rows = screen_rows.max(1);
    let cols = screen_cols.max(1);

    cursor.row = cursor.row.min(buffer.line_count().saturating_sub(1));
    cursor.col = cursor.col.min(buffer.line_len(cursor.row));

    if cursor.row < cursor.row_offset {
        cursor.row_offset = cursor.row;
    } else if cursor.row >= cursor.row_offset + rows {
        cursor.row_offset = cursor.row + 1 - rows;
    }

    if cursor.col < cursor.col_offset {
        cursor.col_offset = cursor.col;
    } else if cursor.col >= cursor.col_offset + cols {
        cursor.col_offset = cursor.col + 1 - cols;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent {
    /// Visible slice of a buffer line; `comment` when it gets comment color.
    Text { text: String, comment: bool },
    Tilde,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    pub gutter: Option<String>,
    pub content: RowContent,
    /// The cursor's row, drawn reversed when current-line highlight is on.
    pub highlight: bool,
}

/// Everything needed to paint one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    pub rows: Vec<FrameRow>,
    pub status: String,
    pub message: String,
    /// Terminal cursor cell as (x, y) from the top-left of the screen.
    pub cursor: (usize, usize),
}

impl App {
    /// Columns left for text once the gutter is taken out.
    pub(crate) fn text_cols(&self) -> usize {
        let gutter = if self.settings.show_line_numbers { GUTTER_WIDTH } else { 0 };
        self.screen.cols.saturating_sub(gutter).max(1)
    }

    /// Scrolls the viewport to the cursor and builds the frame to paint.
    pub fn render_frame(&mut self, now: Instant) -> RenderFrame {
        let rows = self.screen.rows;
        let cols = self.text_cols();
        scroll(&mut self.cursor, &self.buffer, rows, cols);
        render(self, now)
    }
}

/// Builds the frame from an already-scrolled session.
pub fn render(app: &App, now: Instant) -> RenderFrame {
    let settings = &app.settings;
    let cursor = app.cursor;
    let text_cols = app.text_cols();
    let gutter_width = if settings.show_line_numbers { GUTTER_WIDTH } else { 0 };

    let rows = (0..app.screen.rows)
        .map(|y| {
            let file_row = cursor.row_offset + y;
            let in_buffer = file_row < app.buffer.line_count();
            let gutter = settings.show_line_numbers.then(|| {
                if in_buffer {
                    format!("{:>4} ", file_row + 1)
                } else {
                    " ".repeat(GUTTER_WIDTH)
                }
            });
            let content = if in_buffer {
                line_content(app, file_row, text_cols)
            } else if settings.show_tilde {
                RowContent::Tilde
            } else {
                RowContent::Blank
            };
            FrameRow {
                gutter,
                content,
                highlight: settings.highlight_current_line && file_row == cursor.row,
            }
        })
        .collect();

    let message = app
        .visible_status(now)
        .map(|msg| msg.chars().take(app.screen.cols).collect())
        .unwrap_or_default();

    let cursor_pos = match &app.command_line {
        Some(line) => (1 + line.chars().count(), app.screen.rows + 1),
        None => (
            cursor.col - cursor.col_offset + gutter_width,
            cursor.row - cursor.row_offset,
        ),
    };

    RenderFrame {
        rows,
        status: status_line(app),
        message,
        cursor: cursor_pos,
    }
}

fn line_content(app: &App, row: usize, text_cols: usize) -> RowContent {
    let line = app.buffer.get_line(row);
    if line.is_empty() {
        return if app.settings.show_tilde {
            RowContent::Tilde
        } else {
            RowContent::Blank
        };
    }
    let start = app.cursor.col_offset.min(line.len());
    let end = (start + text_cols).min(line.len());
    let visible = &line[start..end];
    if visible.is_empty() {
        return RowContent::Blank;
    }
    let comment =
        app.settings.syntax_highlighting && (line.starts_with(b"#") || line.starts_with(b"//"));
    RowContent::Text {
        text: printable(visible),
        comment,
    }
}

/// Decodes a visible slice, showing each control byte as a single `?` so
/// every byte still takes one cell.
fn printable(bytes: &[u8]) -> String {
    let cleaned: Vec<u8> = bytes
        .iter()
        .map(|&b| if b < b' ' || b == 0x7f { b'?' } else { b })
        .collect();
    String::from_utf8_lossy(&cleaned).into_owned()
}

/// Fills the `%f`, `%modified` and `%m` tokens of the status template.
pub fn expand_status_format(format: &str, file: &str, dirty: bool, mode: &str) -> String {
    format
        .replace("%f", file)
        .replace("%modified", if dirty { "*" } else { "" })
        .replace("%m", mode)
}

fn status_line(app: &App) -> String {
    let width = app.screen.cols;
    let left = expand_status_format(
        &app.settings.status_format,
        &app.file_label(),
        app.buffer.is_dirty(),
        app.mode.label(),
    );
    let right = format!("{}/{}", app.cursor.row + 1, app.buffer.line_count());
    compose_status(&left, &right, width)
}

/// Left text truncated to `width`, padded, with `right` flush against the
/// right edge when both fit.
fn compose_status(left: &str, right: &str, width: usize) -> String {
    let mut line: String = left.chars().take(width).collect();
    let used = line.chars().count();
    let right_len = right.chars().count();
    if used + right_len <= width {
        line.push_str(&" ".repeat(width - used - right_len));
        line.push_str(right);
    } else {
        line.push_str(&" ".repeat(width - used));
    }
    line
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::app::config::Settings;
    use crate::app::types::{Mode, ScreenSize};

    fn app_with(settings: Settings, lines: &[&str], rows: usize, cols: usize) -> App {
        let mut app = App::new(settings, ScreenSize { rows, cols });
        for (i, line) in lines.iter().enumerate() {
            app.buffer.set_line(i, line.as_bytes());
        }
        app.buffer.set_dirty(false);
        app
    }

    fn text_of(row: &FrameRow) -> &str {
        match &row.content {
            RowContent::Text { text, .. } => text,
            RowContent::Tilde => "~",
            RowContent::Blank => "",
        }
    }

    #[test]
    fn scroll_keeps_cursor_in_window() {
        let lines: Vec<String> = (0..50).map(|i| "x".repeat(i)).collect();
        let mut buffer = LineBuffer::new();
        for (i, line) in lines.iter().enumerate() {
            buffer.set_line(i, line.as_bytes());
        }
        for screen_rows in [1, 3, 10, 60] {
            for screen_cols in [1, 4, 20] {
                let mut cursor = Cursor::default();
                for (row, col) in [(0, 0), (49, 49), (20, 7), (3, 40), (49, 0), (0, 0)] {
                    cursor.row = row;
                    cursor.col = col;
                    scroll(&mut cursor, &buffer, screen_rows, screen_cols);
                    assert!(cursor.row < buffer.line_count());
                    assert!(cursor.col <= buffer.line_len(cursor.row));
                    assert!(cursor.row_offset <= cursor.row);
                    assert!(cursor.row < cursor.row_offset + screen_rows);
                    assert!(cursor.col_offset <= cursor.col);
                    assert!(cursor.col < cursor.col_offset + screen_cols);
                }
            }
        }
    }

    #[test]
    fn scroll_moves_minimally() {
        let mut buffer = LineBuffer::new();
        for i in 0..100 {
            buffer.set_line(i, b"line".to_vec());
        }
        let mut cursor = Cursor { row: 30, ..Cursor::default() };
        scroll(&mut cursor, &buffer, 10, 80);
        assert_eq!(cursor.row_offset, 21);
        cursor.row = 25;
        scroll(&mut cursor, &buffer, 10, 80);
        assert_eq!(cursor.row_offset, 21);
        cursor.row = 5;
        scroll(&mut cursor, &buffer, 10, 80);
        assert_eq!(cursor.row_offset, 5);
    }

    #[test]
    fn scroll_clamps_out_of_range_cursor() {
        let mut buffer = LineBuffer::new();
        buffer.set_line(1, b"abc".to_vec());
        let mut cursor = Cursor { row: 9, col: 9, ..Cursor::default() };
        scroll(&mut cursor, &buffer, 0, 0);
        assert_eq!((cursor.col, cursor.row), (3, 1));
    }

    #[test]
    fn renders_tilde_rows_and_empty_lines() {
        let mut app = app_with(Settings::default(), &["hello", "", "world"], 5, 20);
        let frame = app.render_frame(Instant::now());
        let rows: Vec<&str> = frame.rows.iter().map(text_of).collect();
        assert_eq!(rows, vec!["hello", "~", "world", "~", "~"]);
        assert!(frame.rows.iter().all(|r| r.gutter.is_none() && !r.highlight));

        let settings = Settings {
            show_tilde: false,
            ..Settings::default()
        };
        let mut app = app_with(settings, &["hello", ""], 3, 20);
        let frame = app.render_frame(Instant::now());
        let rows: Vec<&str> = frame.rows.iter().map(text_of).collect();
        assert_eq!(rows, vec!["hello", "", ""]);
    }

    #[test]
    fn line_number_gutter() {
        let settings = Settings {
            show_line_numbers: true,
            ..Settings::default()
        };
        let mut app = app_with(settings, &["a", "b"], 3, 20);
        let frame = app.render_frame(Instant::now());
        let gutters: Vec<_> = frame.rows.iter().map(|r| r.gutter.clone().unwrap()).collect();
        assert_eq!(gutters, vec!["   1 ", "   2 ", "     "]);
        assert_eq!(frame.cursor, (5, 0));
    }

    #[test]
    fn horizontal_scroll_slices_lines() {
        let mut app = app_with(Settings::default(), &["0123456789abcdef", "xy"], 3, 8);
        app.cursor.col = 12;
        let frame = app.render_frame(Instant::now());
        assert_eq!(app.cursor.col_offset, 5);
        assert_eq!(text_of(&frame.rows[0]), "56789abc");
        assert_eq!(frame.rows[1].content, RowContent::Blank);
        assert_eq!(frame.cursor, (7, 0));
    }

    #[test]
    fn control_bytes_take_one_cell() {
        let mut app = app_with(Settings::default(), &["a\tb\x1bc\x7f"], 1, 20);
        let frame = app.render_frame(Instant::now());
        assert_eq!(text_of(&frame.rows[0]), "a?b?c?");
    }

    #[test]
    fn comment_lines_are_marked_when_highlighting() {
        let settings = Settings {
            syntax_highlighting: true,
            ..Settings::default()
        };
        let mut app = app_with(settings, &["# note", "// note", "code # not"], 3, 20);
        let frame = app.render_frame(Instant::now());
        let flags: Vec<bool> = frame
            .rows
            .iter()
            .map(|r| matches!(r.content, RowContent::Text { comment: true, .. }))
            .collect();
        assert_eq!(flags, vec![true, true, false]);

        let mut app = app_with(Settings::default(), &["# note"], 1, 20);
        let frame = app.render_frame(Instant::now());
        assert!(matches!(frame.rows[0].content, RowContent::Text { comment: false, .. }));
    }

    #[test]
    fn current_line_highlight() {
        let settings = Settings {
            highlight_current_line: true,
            ..Settings::default()
        };
        let mut app = app_with(settings, &["a", "b"], 3, 20);
        app.cursor.row = 1;
        let frame = app.render_frame(Instant::now());
        let flags: Vec<bool> = frame.rows.iter().map(|r| r.highlight).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn status_tokens() {
        assert_eq!(
            expand_status_format("%f%modified - %m", "a.txt", true, "INSERT"),
            "a.txt* - INSERT"
        );
        assert_eq!(
            expand_status_format("[%m] %f%modified", "[No Name]", false, "COMMAND"),
            "[COMMAND] [No Name]"
        );
    }

    #[test]
    fn status_line_layout() {
        assert_eq!(compose_status("left", "1/3", 12), "left     1/3");
        assert_eq!(compose_status("left", "1/3", 7), "left1/3");
        assert_eq!(compose_status("left side", "1/3", 10), "left side ");
        assert_eq!(compose_status("much too long", "1/3", 6), "much t");
    }

    #[test]
    fn status_line_reflects_session() {
        let mut app = app_with(Settings::default(), &["a", "b", "c"], 3, 30);
        app.file_path = Some(PathBuf::from("notes.txt"));
        app.mode = Mode::Command;
        app.buffer.insert_char(0, 0, b'z');
        app.cursor.row = 1;
        let frame = app.render_frame(Instant::now());
        assert_eq!(frame.status, format!("notes.txt* - COMMAND{}2/3", " ".repeat(7)));
        assert_eq!(frame.status.len(), 30);
    }

    #[test]
    fn unnamed_buffer_shows_placeholder_in_status() {
        let mut app = app_with(Settings::default(), &["a"], 3, 30);
        assert_eq!(app.file_path, None);
        let frame = app.render_frame(Instant::now());
        assert_eq!(frame.status, format!("[No Name] - INSERT{}1/1", " ".repeat(9)));
    }

    #[test]
    fn message_line_expires() {
        let mut app = app_with(Settings::default(), &["a"], 3, 8);
        app.set_status("a long message");
        let set_at = app.status_time.unwrap();
        assert_eq!(app.render_frame(set_at).message, "a long m");
        assert_eq!(app.render_frame(set_at + Duration::from_secs(5)).message, "");
    }

    #[test]
    fn cursor_sits_on_message_line_while_entering_a_command() {
        let mut app = app_with(Settings::default(), &["a"], 3, 20);
        app.mode = Mode::Command;
        app.command_line = Some("wq".to_string());
        let frame = app.render_frame(Instant::now());
        assert_eq!(frame.cursor, (3, 4));
    }
}
