use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;

static ENABLED: AtomicBool = AtomicBool::new(false);

pub fn timestamp_prefix() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Turns on the debug log. `SLOWERTEXT_LOG=1` enables it without touching settings.
pub fn enable() {
    ENABLED.store(true, Ordering::Relaxed);
}

fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("SLOWERTEXT_LOG").ok().as_deref() == Some("1")
}

fn log_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    let mut path = PathBuf::from(home);
    path.push(".config/slowertext");
    let _ = fs::create_dir_all(&path);
    path.push("slowertext.log");
    Some(path)
}

pub fn debug_log(message: &str) {
    if !enabled() {
        return;
    }
    let Some(path) = log_path() else {
        return;
    };
    if let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{} {}", timestamp_prefix(), message);
    }
}
