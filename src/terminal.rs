use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use crossterm::cursor::SetCursorStyle;
use crossterm::execute;
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

use crate::app::{ByteSource, ScreenSize};
use crate::logging::debug_log;

/// How long a read waits before reporting that no byte arrived.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Raw mode and the alternate screen for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        debug_log("terminal: raw mode on");
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), SetCursorStyle::DefaultUserShape);
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        debug_log("terminal: restored");
    }
}

/// Terminal size as (cols, rows).
pub fn screen_size() -> Result<(u16, u16)> {
    match terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => Ok((cols, rows)),
        _ => Err(anyhow!("Unable to get terminal size")),
    }
}

/// Notices terminal resizes by comparing the size between polls.
pub struct ResizeWatch {
    last: (u16, u16),
}

impl ResizeWatch {
    pub fn new(initial: (u16, u16)) -> Self {
        Self { last: initial }
    }

    /// The new text-area geometry if the terminal changed size since the last
    /// call. A failed size query counts as no change.
    pub fn poll(&mut self) -> Option<ScreenSize> {
        let current = screen_size().ok()?;
        if current == self.last {
            return None;
        }
        self.last = current;
        debug_log(&format!("terminal: resized to {}x{}", current.0, current.1));
        Some(ScreenSize::from_terminal(current.0, current.1))
    }
}

/// Stdin bytes delivered through a reader thread so reads can time out.
pub struct StdinBytes {
    rx: Receiver<io::Result<u8>>,
    timeout: Duration,
}

impl StdinBytes {
    pub fn spawn(timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            let mut lock = stdin.lock();
            let mut byte = [0u8; 1];
            loop {
                let item = match lock.read(&mut byte) {
                    Ok(0) => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
                    Ok(_) => Ok(byte[0]),
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => Err(err),
                };
                let failed = item.is_err();
                if tx.send(item).is_err() || failed {
                    break;
                }
            }
        });
        Self { rx, timeout }
    }
}

impl ByteSource for StdinBytes {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.rx.recv_timeout(self.timeout) {
            Ok(Ok(byte)) => Ok(Some(byte)),
            Ok(Err(err)) => Err(err),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                // Keep the caller's loop from spinning on a dead reader.
                thread::sleep(self.timeout);
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "input reader stopped"))
            }
        }
    }
}
