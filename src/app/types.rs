use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::buffer::LineBuffer;
use super::config::Settings;
use super::keymap::Bindings;

/// How long a status message stays on the message line.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Insert,
    Command,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
        }
    }
}

/// Which key table applies: the mode plus the command-entry sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Insert,
    Command,
    CommandEntry,
}

/// Cursor position and scroll offsets, all zero-based.
///
/// `row` indexes a buffer line and `col` is a byte offset within it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub col: usize,
    pub row: usize,
    pub row_offset: usize,
    pub col_offset: usize,
}

/// Text-area geometry: terminal rows minus the status and message lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub rows: usize,
    pub cols: usize,
}

impl ScreenSize {
    pub fn from_terminal(cols: u16, rows: u16) -> Self {
        Self {
            rows: usize::from(rows).saturating_sub(2).max(1),
            cols: usize::from(cols).max(1),
        }
    }
}

/// One editing session: everything the control loop owns.
pub struct App {
    pub(crate) settings: Settings,
    pub(crate) bindings: Bindings,
    pub(crate) buffer: LineBuffer,
    pub(crate) cursor: Cursor,
    pub(crate) mode: Mode,
    /// Pending `:` command text; `Some` only while entering a command.
    pub(crate) command_line: Option<String>,
    pub(crate) file_path: Option<PathBuf>,
    pub(crate) quit: bool,
    pub(crate) status_message: String,
    pub(crate) status_time: Option<Instant>,
    pub(crate) screen: ScreenSize,
}

impl App {
    pub fn new(settings: Settings, screen: ScreenSize) -> Self {
        let bindings = Bindings::from_specs(&settings.bindings);
        let mode = settings.default_mode;
        Self {
            settings,
            bindings,
            buffer: LineBuffer::new(),
            cursor: Cursor::default(),
            mode,
            command_line: None,
            file_path: None,
            quit: false,
            status_message: String::new(),
            status_time: None,
            screen,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_time = Some(Instant::now());
    }

    /// The status message if it is still young enough to show at `now`.
    pub fn visible_status(&self, now: Instant) -> Option<&str> {
        let time = self.status_time?;
        if self.status_message.is_empty() || now.saturating_duration_since(time) >= MESSAGE_TIMEOUT {
            return None;
        }
        Some(&self.status_message)
    }

    pub fn input_state(&self) -> InputState {
        match (self.mode, &self.command_line) {
            (Mode::Insert, _) => InputState::Insert,
            (Mode::Command, None) => InputState::Command,
            (Mode::Command, Some(_)) => InputState::CommandEntry,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn resize(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    pub(crate) fn file_label(&self) -> String {
        self.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string())
    }
}
