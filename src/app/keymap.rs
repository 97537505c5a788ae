use super::config::BindingSpecs;

pub const ESC: u8 = 0x1b;
pub const BACKSPACE: u8 = 0x7f;
pub const CTRL_H: u8 = 0x08;

/// A decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any byte without a symbolic meaning of its own, control codes included.
    Byte(u8),
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Delete,
    /// Result of a binding that names no real key. The decoder never yields it.
    Unbound,
}

impl Key {
    /// Maps a raw byte to its key, giving Tab and Escape their symbolic form.
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            b'\t' => Key::Tab,
            ESC => Key::Escape,
            other => Key::Byte(other),
        }
    }

    pub const fn ctrl(letter: u8) -> Self {
        Key::from_byte(letter & 0x1f)
    }

    pub fn is_enter(self) -> bool {
        matches!(self, Key::Byte(b'\r') | Key::Byte(b'\n'))
    }

    /// DEL, ASCII BS and Ctrl-H (which is the same byte as BS).
    pub fn is_backspace(self) -> bool {
        matches!(self, Key::Byte(BACKSPACE) | Key::Byte(CTRL_H))
    }

    pub fn is_arrow(self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right)
    }

    /// Numeric code used in diagnostics; symbolic keys use the 1000 range.
    pub fn code(self) -> u32 {
        match self {
            Key::Byte(b) => u32::from(b),
            Key::Tab => u32::from(b'\t'),
            Key::Escape => u32::from(ESC),
            Key::Delete => 1000,
            Key::Up => 1001,
            Key::Down => 1002,
            Key::Left => 1003,
            Key::Right => 1004,
            Key::Unbound => 0,
        }
    }
}

/// Resolves a key-specification string such as `ctrl+s` or `Arrow_Up`.
///
/// Named tokens are case-insensitive. Anything unrecognized resolves to
/// [`Key::Unbound`], which matches no decoded key.
pub fn parse_key_binding(spec: &str) -> Key {
    let lower = spec.trim().to_ascii_lowercase();
    match lower.as_str() {
        "" => return Key::Unbound,
        "escape" | "esc" => return Key::Escape,
        "backspace" => return Key::Byte(BACKSPACE),
        "delete" | "del" => return Key::Delete,
        "arrow_up" | "up" => return Key::Up,
        "arrow_down" | "down" => return Key::Down,
        "arrow_left" | "left" => return Key::Left,
        "arrow_right" | "right" => return Key::Right,
        "tab" => return Key::Tab,
        "enter" | "return" => return Key::Byte(b'\r'),
        "space" => return Key::Byte(b' '),
        _ => {}
    }

    if let Some(rest) = lower.strip_prefix("ctrl+") {
        return match rest.as_bytes() {
            [letter @ b'a'..=b'z'] => Key::ctrl(*letter),
            _ => Key::Unbound,
        };
    }
    // Alt chords are not decoded yet; the binding falls back to the bare character.
    if let Some(rest) = lower.strip_prefix("alt+") {
        return match rest.as_bytes() {
            [ch] => Key::from_byte(*ch),
            _ => Key::Unbound,
        };
    }

    match lower.as_bytes() {
        [ch] => Key::from_byte(*ch),
        // Function keys (`f1`, `f12`, ...) and everything else stay unbound.
        _ => Key::Unbound,
    }
}

/// Logical actions with a configurable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EnterInsert,
    EnterCommand,
    Save,
    Quit,
    ForceQuit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

/// Binding strings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    enter_insert: Key,
    enter_command: Key,
    save: Key,
    quit: Key,
    force_quit: Key,
    move_up: Key,
    move_down: Key,
    move_left: Key,
    move_right: Key,
}

impl Bindings {
    pub fn from_specs(specs: &BindingSpecs) -> Self {
        Self {
            enter_insert: parse_key_binding(&specs.enter_insert),
            enter_command: parse_key_binding(&specs.enter_command),
            save: parse_key_binding(&specs.save_file),
            quit: parse_key_binding(&specs.quit_editor),
            force_quit: parse_key_binding(&specs.force_quit),
            move_up: parse_key_binding(&specs.cursor_up),
            move_down: parse_key_binding(&specs.cursor_down),
            move_left: parse_key_binding(&specs.cursor_left),
            move_right: parse_key_binding(&specs.cursor_right),
        }
    }

    pub fn key_for(&self, action: Action) -> Key {
        match action {
            Action::EnterInsert => self.enter_insert,
            Action::EnterCommand => self.enter_command,
            Action::Save => self.save,
            Action::Quit => self.quit,
            Action::ForceQuit => self.force_quit,
            Action::MoveUp => self.move_up,
            Action::MoveDown => self.move_down,
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
        }
    }

    pub fn matches(&self, key: Key, action: Action) -> bool {
        key != Key::Unbound && self.key_for(action) == key
    }

    /// The movement a key triggers through the `cursor_*` bindings, if any.
    pub fn movement(&self, key: Key) -> Option<Key> {
        [
            (Action::MoveUp, Key::Up),
            (Action::MoveDown, Key::Down),
            (Action::MoveLeft, Key::Left),
            (Action::MoveRight, Key::Right),
        ]
        .into_iter()
        .find(|(action, _)| self.matches(key, *action))
        .map(|(_, arrow)| arrow)
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::from_specs(&BindingSpecs::default())
    }
}
