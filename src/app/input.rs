use anyhow::Result;

use crate::logging::debug_log;

use super::App;
use super::decoder::{ByteSource, KeyDecoder};
use super::keymap::{Action, Key};
use super::types::{InputState, Mode};

impl App {
    /// Reads the next key and applies it. A failed read leaves the session
    /// as it was and reports `Error: Failed to read input`.
    pub fn process_input<S: ByteSource>(&mut self, keys: &mut KeyDecoder<S>) {
        match keys.read_key() {
            Ok(Some(key)) => handle_key(self, key),
            Ok(None) => {}
            Err(err) => {
                debug_log(&format!("input: {}", err));
                self.set_status("Error: Failed to read input");
            }
        }
    }
}

/// Applies one decoded key to the session.
///
/// Never fails: an action error becomes an `Error: ...` status message.
/// While a command line is being entered, the message line previews it.
pub fn handle_key(app: &mut App, key: Key) {
    let outcome = match app.input_state() {
        InputState::Insert => insert_key(app, key),
        InputState::Command => command_key(app, key),
        InputState::CommandEntry => command_entry_key(app, key),
    };
    if let Err(err) = outcome {
        app.set_status(format!("Error: {:#}", err));
    }
    if let Some(line) = &app.command_line {
        let preview = format!(":{}", line);
        app.set_status(preview);
    }
}

fn insert_key(app: &mut App, key: Key) -> Result<()> {
    // Tab always inserts, whatever it is bound to.
    if key == Key::Tab {
        app.insert_tab();
        return Ok(());
    }
    if app.bindings.matches(key, Action::EnterCommand) {
        app.mode = Mode::Command;
        app.set_status("Command mode");
        return Ok(());
    }
    if app.bindings.matches(key, Action::Save) {
        return app.save();
    }
    if app.bindings.matches(key, Action::Quit) {
        app.request_quit(false);
        return Ok(());
    }
    if app.bindings.matches(key, Action::ForceQuit) {
        app.request_quit(true);
        return Ok(());
    }

    match key {
        _ if key.is_enter() => app.insert_newline(),
        _ if key.is_backspace() => app.backspace(),
        Key::Delete => app.delete_forward(),
        _ if key.is_arrow() => app.move_cursor(key),
        _ if app.bindings.matches(key, Action::EnterInsert) => {
            app.set_status("Already in Insert mode");
        }
        Key::Byte(byte) if byte >= b' ' => app.insert_byte(byte),
        _ => {
            if app.settings.debug_mode {
                let code = key.code();
                app.set_status(format!(
                    "Unhandled control char in INSERT: {} (0x{:02x})",
                    code, code
                ));
            }
        }
    }
    Ok(())
}

/// Bindings that apply in Command mode whether or not a command is being
/// entered. Returns `true` when the key was consumed.
fn command_common_key(app: &mut App, key: Key) -> bool {
    if app.bindings.matches(key, Action::EnterInsert) {
        app.command_line = None;
        app.mode = Mode::Insert;
        app.set_status("Insert mode");
    } else if key == Key::Byte(b':') {
        app.command_line = Some(String::new());
    } else if app.bindings.matches(key, Action::Quit) {
        app.request_quit(false);
    } else if app.bindings.matches(key, Action::ForceQuit) {
        app.request_quit(true);
    } else {
        return false;
    }
    true
}

fn command_key(app: &mut App, key: Key) -> Result<()> {
    if command_common_key(app, key) {
        return Ok(());
    }
    let arrow = app
        .bindings
        .movement(key)
        .or_else(|| key.is_arrow().then_some(key));
    if let Some(arrow) = arrow {
        app.move_cursor(arrow);
    } else if app.settings.debug_mode {
        app.set_status(format!("Command mode key: {}", key.code()));
    } else {
        app.set_status("Invalid command mode key");
    }
    Ok(())
}

fn command_entry_key(app: &mut App, key: Key) -> Result<()> {
    if command_common_key(app, key) {
        return Ok(());
    }
    let Some(mut line) = app.command_line.take() else {
        return Ok(());
    };
    if key.is_enter() {
        return app.execute_command(&line);
    }
    if key.is_backspace() {
        line.pop();
    } else if let Key::Byte(byte @ b' '..=b'~') = key {
        line.push(char::from(byte));
    }
    app.command_line = Some(line);
    Ok(())
}
