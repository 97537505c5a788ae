mod app;
mod logging;
mod terminal;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use ratatui::prelude::*;

use app::{App, KeyDecoder, LoadedSettings, ScreenSize, Theme, load_settings};
use logging::debug_log;
use terminal::{READ_TIMEOUT, ResizeWatch, StdinBytes, TerminalGuard, screen_size};
use ui::{apply_cursor_style, draw};

fn main() -> Result<()> {
    let LoadedSettings {
        settings,
        source,
        warnings,
    } = load_settings().unwrap_or_else(|err| {
        debug_log(&format!("settings: {:#}, using defaults", err));
        LoadedSettings::default()
    });
    if settings.debug_mode {
        logging::enable();
    }
    match &source {
        Some(path) => debug_log(&format!("settings: loaded {}", path.display())),
        None => debug_log("settings: no settings file, using defaults"),
    }
    for warning in &warnings {
        debug_log(&format!("settings: {}", warning));
    }
    if settings.debug_mode {
        debug_log(&format!("settings: {:?}", settings));
    }

    let (cols, rows) = screen_size()?;
    let theme = Theme::from_settings(&settings);
    let tab_width = settings.tab_width;
    let mut app = App::new(settings, ScreenSize::from_terminal(cols, rows));
    match std::env::args_os().nth(1) {
        Some(arg) => app.open(PathBuf::from(arg)),
        None => app.set_status(format!("SlowerText Editor - Tab width: {} spaces", tab_width)),
    }

    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut resize = ResizeWatch::new((cols, rows));
    let mut keys = KeyDecoder::new(StdinBytes::spawn(READ_TIMEOUT));

    while !app.should_quit() {
        if let Some(screen) = resize.poll() {
            app.resize(screen);
        }
        let frame = app.render_frame(Instant::now());
        apply_cursor_style(app.mode())?;
        terminal.draw(|f| draw(f, &frame, &theme))?;

        app.process_input(&mut keys);
    }

    debug_log("exit");
    Ok(())
}
