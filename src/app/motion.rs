use super::App;
use super::keymap::Key;

impl App {
    /// Moves one cell in the arrow's direction. Other keys are ignored.
    pub(super) fn move_cursor(&mut self, arrow: Key) {
        match arrow {
            Key::Up => self.move_up(),
            Key::Down => self.move_down(),
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            _ => {}
        }
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.buffer.line_len(self.cursor.row);
        }
    }

    fn move_right(&mut self) {
        let len = self.buffer.line_len(self.cursor.row);
        if self.cursor.col < len {
            self.cursor.col += 1;
        } else if self.cursor.row + 1 < self.buffer.line_count() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
    }

    fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            let len = self.buffer.line_len(self.cursor.row);
            self.cursor.col = self.cursor.col.min(len);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.row + 1 < self.buffer.line_count() {
            self.cursor.row += 1;
            let len = self.buffer.line_len(self.cursor.row);
            self.cursor.col = self.cursor.col.min(len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Settings;
    use crate::app::types::ScreenSize;

    fn app_with(lines: &[&str]) -> App {
        let mut app = App::new(Settings::default(), ScreenSize { rows: 20, cols: 80 });
        for (i, line) in lines.iter().enumerate() {
            app.buffer.set_line(i, line.as_bytes());
        }
        app
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut app = app_with(&["long line", "ab", "longer line"]);
        app.cursor.col = 7;
        app.move_cursor(Key::Down);
        assert_eq!((app.cursor.col, app.cursor.row), (2, 1));
        app.move_cursor(Key::Down);
        assert_eq!((app.cursor.col, app.cursor.row), (2, 2));
        app.move_cursor(Key::Down);
        assert_eq!((app.cursor.col, app.cursor.row), (2, 2));
    }

    #[test]
    fn left_wraps_to_end_of_previous_line() {
        let mut app = app_with(&["abc", "de"]);
        app.cursor.row = 1;
        app.move_cursor(Key::Left);
        assert_eq!((app.cursor.col, app.cursor.row), (3, 0));
        app.cursor.col = 0;
        app.move_cursor(Key::Left);
        assert_eq!((app.cursor.col, app.cursor.row), (0, 0));
    }

    #[test]
    fn right_wraps_to_start_of_next_line() {
        let mut app = app_with(&["ab", "cd"]);
        app.cursor.col = 2;
        app.move_cursor(Key::Right);
        assert_eq!((app.cursor.col, app.cursor.row), (0, 1));
        app.cursor.col = 2;
        app.move_cursor(Key::Right);
        assert_eq!((app.cursor.col, app.cursor.row), (2, 1));
    }

    #[test]
    fn up_at_top_stays_put() {
        let mut app = app_with(&["abc"]);
        app.cursor.col = 1;
        app.move_cursor(Key::Up);
        assert_eq!((app.cursor.col, app.cursor.row), (1, 0));
    }
}
