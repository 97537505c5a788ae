use ratatui::prelude::Color;

use super::config::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub(crate) text_fg: Color,
    pub(crate) background_bg: Color,
    pub(crate) status_bg: Color,
    pub(crate) comment_fg: Color,
}

impl Theme {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            text_fg: parse_color(&settings.text_color),
            background_bg: parse_color(&settings.background_color),
            status_bg: parse_color(&settings.status_bar_color),
            comment_fg: parse_color(&settings.comment_color),
        }
    }
}

/// Resolves a basic color name or `#rrggbb`; anything else is the terminal
/// default.
fn parse_color(value: &str) -> Color {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "black" => return Color::Black,
        "red" => return Color::Red,
        "green" => return Color::Green,
        "yellow" => return Color::Yellow,
        "blue" => return Color::Blue,
        "magenta" => return Color::Magenta,
        "cyan" => return Color::Cyan,
        "white" => return Color::White,
        _ => {}
    }
    parse_hex(value).unwrap_or(Color::Reset)
}

fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
