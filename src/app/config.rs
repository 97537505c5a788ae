use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::types::Mode;

const TAB_WIDTH_RANGE: std::ops::RangeInclusive<usize> = 1..=16;

/// Key-specification strings for every configurable action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSpecs {
    pub enter_insert: String,
    pub enter_command: String,
    pub save_file: String,
    pub quit_editor: String,
    pub force_quit: String,
    pub cursor_up: String,
    pub cursor_down: String,
    pub cursor_left: String,
    pub cursor_right: String,
}

impl Default for BindingSpecs {
    fn default() -> Self {
        Self {
            enter_insert: "ctrl+i".to_string(),
            enter_command: "escape".to_string(),
            save_file: "ctrl+s".to_string(),
            quit_editor: "ctrl+q".to_string(),
            force_quit: "ctrl+f".to_string(),
            cursor_up: "arrow_up".to_string(),
            cursor_down: "arrow_down".to_string(),
            cursor_left: "arrow_left".to_string(),
            cursor_right: "arrow_right".to_string(),
        }
    }
}

impl BindingSpecs {
    fn slot(&mut self, key: &str) -> Option<&mut String> {
        let slot = match key {
            "enter_insert" => &mut self.enter_insert,
            "enter_command" => &mut self.enter_command,
            "save_file" => &mut self.save_file,
            "quit_editor" => &mut self.quit_editor,
            "force_quit" => &mut self.force_quit,
            "cursor_up" => &mut self.cursor_up,
            "cursor_down" => &mut self.cursor_down,
            "cursor_left" => &mut self.cursor_left,
            "cursor_right" => &mut self.cursor_right,
            _ => return None,
        };
        Some(slot)
    }
}

/// Resolved editor settings. Read-only once the session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tab_width: usize,
    pub auto_indent: bool,
    pub show_line_numbers: bool,
    pub show_tilde: bool,
    pub highlight_current_line: bool,
    pub syntax_highlighting: bool,
    pub text_color: String,
    pub background_color: String,
    pub status_bar_color: String,
    pub comment_color: String,
    pub status_format: String,
    pub confirm_quit: bool,
    pub debug_mode: bool,
    pub default_mode: Mode,
    pub bindings: BindingSpecs,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_width: 4,
            auto_indent: true,
            show_line_numbers: false,
            show_tilde: true,
            highlight_current_line: false,
            syntax_highlighting: false,
            text_color: "white".to_string(),
            background_color: "black".to_string(),
            status_bar_color: "cyan".to_string(),
            comment_color: "green".to_string(),
            status_format: "%f%modified - %m".to_string(),
            confirm_quit: true,
            debug_mode: false,
            default_mode: Mode::Insert,
            bindings: BindingSpecs::default(),
        }
    }
}

impl Settings {
    /// Applies one key/value pair. Unknown keys are ignored; a value that is
    /// out of range leaves the setting alone and is reported back.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "tab_width" => match value.parse::<usize>() {
                Ok(width) if TAB_WIDTH_RANGE.contains(&width) => self.tab_width = width,
                _ => bail!("tab_width must be 1..=16, got {:?}", value),
            },
            "auto_indent" => self.auto_indent = string_to_bool(value),
            "show_line_numbers" => self.show_line_numbers = string_to_bool(value),
            "show_tilde" => self.show_tilde = string_to_bool(value),
            "highlight_current_line" => self.highlight_current_line = string_to_bool(value),
            "syntax_highlighting" => self.syntax_highlighting = string_to_bool(value),
            "confirm_quit" => self.confirm_quit = string_to_bool(value),
            "debug_mode" => self.debug_mode = string_to_bool(value),
            "text_color" => self.text_color = value.to_string(),
            "background_color" => self.background_color = value.to_string(),
            "status_bar_color" => self.status_bar_color = value.to_string(),
            "comment_color" => self.comment_color = value.to_string(),
            "status_format" => self.status_format = value.to_string(),
            "default_mode" => match value {
                "insert" => self.default_mode = Mode::Insert,
                "command" => self.default_mode = Mode::Command,
                _ => {}
            },
            other => {
                if let Some(slot) = self.bindings.slot(other) {
                    *slot = value.to_string();
                }
            }
        }
        Ok(())
    }

    /// Applies every line of an rc-format document, returning warnings for
    /// values that were rejected.
    pub fn apply_rc(&mut self, content: &str) -> Vec<String> {
        let mut warnings = Vec::new();
        for line in content.lines() {
            let Some((key, value)) = parse_config_line(line) else {
                continue;
            };
            if let Err(err) = self.apply(key, value) {
                warnings.push(format!("{:#}", err));
            }
        }
        warnings
    }

    fn apply_toml(&mut self, content: &str) -> Result<Vec<String>> {
        let doc: TomlSettings = toml::from_str(content)?;
        let mut warnings = Vec::new();
        for (key, value) in &doc.values {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                _ => {
                    warnings.push(format!("{} has an unsupported value type", key));
                    continue;
                }
            };
            if let Err(err) = self.apply(key, &text) {
                warnings.push(format!("{:#}", err));
            }
        }
        for (action, spec) in doc.bindings.unwrap_or_default() {
            if self.bindings.slot(&action).is_none() {
                warnings.push(format!("unknown binding {}", action));
                continue;
            }
            if let Err(err) = self.apply(&action, &spec) {
                warnings.push(format!("{:#}", err));
            }
        }
        Ok(warnings)
    }
}

#[derive(Debug, Deserialize)]
struct TomlSettings {
    bindings: Option<HashMap<String, String>>,
    #[serde(flatten)]
    values: HashMap<String, toml::Value>,
}

/// Splits `key = value`. Empty lines, `#` comments and `[section]` headers
/// yield nothing.
pub fn parse_config_line(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), strip_quotes(value.trim())))
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

pub fn string_to_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("runtime/slowertextrc")];
    if let Ok(home) = std::env::var("HOME") {
        let home = PathBuf::from(home);
        candidates.push(home.join(".config/slowertext/slowertextrc"));
        candidates.push(home.join(".slowertextrc"));
        candidates.push(home.join(".config/slowertext/config.toml"));
    }
    candidates
}

/// Settings loaded from one file, with any values it rejected.
#[derive(Debug, Default)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

/// Loads settings from the first file that exists, or the defaults.
pub fn load_settings() -> Result<LoadedSettings> {
    for path in candidate_paths() {
        if path.exists() {
            return load_settings_from(&path);
        }
    }
    Ok(LoadedSettings::default())
}

pub fn load_settings_from(path: &Path) -> Result<LoadedSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut settings = Settings::default();
    let warnings = if path.extension().is_some_and(|ext| ext == "toml") {
        settings
            .apply_toml(&content)
            .with_context(|| format!("parsing {}", path.display()))?
    } else {
        settings.apply_rc(&content)
    };
    Ok(LoadedSettings {
        settings,
        source: Some(path.to_path_buf()),
        warnings,
    })
}
