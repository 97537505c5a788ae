mod buffer;
mod command;
mod config;
mod decoder;
mod edit;
mod file;
mod input;
mod keymap;
mod motion;
mod theme;
mod types;
mod viewport;

pub use config::{LoadedSettings, load_settings};
pub use decoder::{ByteSource, KeyDecoder};
pub use theme::Theme;
pub use types::{App, Mode, ScreenSize};
pub use viewport::{FrameRow, RenderFrame, RowContent};
