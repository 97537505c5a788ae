use std::fs;
use std::path::Path;

use anyhow::{Result, bail};

use crate::logging::debug_log;

use super::buffer::LineBuffer;

/// Replaces the buffer with the file's lines.
///
/// Returns `false` when the file cannot be read; the buffer is left untouched
/// so the caller can treat the path as a new document.
pub fn load_file(path: &Path, buffer: &mut LineBuffer) -> bool {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(err) => {
            debug_log(&format!("load {}: {}", path.display(), err));
            return false;
        }
    };
    buffer.clear();
    for (row, line) in content.split(|&b| b == b'\n').enumerate() {
        buffer.set_line(row, line);
    }
    buffer.set_dirty(false);
    debug_log(&format!("loaded {} ({} lines)", path.display(), buffer.line_count()));
    true
}

/// Writes the lines joined by `\n`, without a trailing separator.
pub fn save_file(path: &Path, buffer: &LineBuffer) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("No filename specified");
    }
    let content = buffer.lines().join(&b'\n');
    fs::write(path, content)?;
    debug_log(&format!("saved {} ({} lines)", path.display(), buffer.line_count()));
    Ok(())
}
