use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::logging::debug_log;

use super::App;
use super::file;
use super::types::Cursor;

impl App {
    /// Opens the CLI file. A file that cannot be read becomes a new document
    /// under that name.
    pub fn open(&mut self, path: PathBuf) {
        if file::load_file(&path, &mut self.buffer) {
            self.set_status(format!("Loaded: {}", path.display()));
        } else {
            self.set_status(format!("New file: {}", path.display()));
        }
        self.cursor = Cursor::default();
        self.file_path = Some(path);
    }

    pub(super) fn save(&mut self) -> Result<()> {
        let Some(path) = self.file_path.clone() else {
            self.set_status("Error: No filename specified");
            return Ok(());
        };
        file::save_file(&path, &self.buffer).context("Could not save file")?;
        self.buffer.set_dirty(false);
        self.set_status(format!("File saved: {}", path.display()));
        Ok(())
    }

    fn save_as(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            self.set_status("Error: No filename provided for save as");
            return Ok(());
        }
        let path = PathBuf::from(name);
        file::save_file(&path, &self.buffer)
            .with_context(|| format!("Could not save file as {}", name))?;
        self.buffer.set_dirty(false);
        self.file_path = Some(path);
        self.set_status(format!("File saved as: {}", name));
        Ok(())
    }

    /// Quits, unless confirmation is on and there are unsaved changes.
    pub(super) fn request_quit(&mut self, force: bool) {
        if !force && self.settings.confirm_quit && self.buffer.is_dirty() {
            self.set_status("File modified. Use force quit or save first");
            return;
        }
        self.quit = true;
    }

    /// Runs a submitted command line (without the leading `:`).
    pub(super) fn execute_command(&mut self, input: &str) -> Result<()> {
        let command = input.trim();
        debug_log(&format!("command: {:?}", command));
        match command {
            "q" => self.request_quit(false),
            "q!" => self.request_quit(true),
            "w" | "s" => self.save()?,
            "wq" | "sq" => {
                if self.file_path.is_none() {
                    self.set_status("Error: No filename specified");
                    return Ok(());
                }
                self.save()?;
                self.quit = true;
            }
            _ => match save_as_target(command) {
                Some(name) => self.save_as(name)?,
                None => self.set_status(format!("Unknown command: {}", command)),
            },
        }
        Ok(())
    }
}

/// The file name of a `saves <name>` command, possibly empty.
fn save_as_target(command: &str) -> Option<&str> {
    let rest = command.strip_prefix("saves")?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}
