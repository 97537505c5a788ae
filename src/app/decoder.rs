use std::io;

use super::keymap::{ESC, Key};

/// Where raw input bytes come from.
///
/// `Ok(None)` means nothing arrived before the source's timeout; it is not
/// an error.
pub trait ByteSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Start,
    SawEscape,
    SawBracket,
    SawDigit(u8),
}

/// Turns raw bytes into [`Key`]s, folding `ESC [ ...` sequences into
/// symbolic keys.
///
/// Unrecognized sequences decode to a bare Escape. Bytes of such a sequence
/// that were already read are dropped, and bytes that were never read stay
/// in the source and decode as ordinary keys.
pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Reads the next key. `Ok(None)` when no input is pending.
    ///
    /// A failed or empty read in the middle of an escape sequence yields a
    /// bare Escape; only a failure on the first byte is reported.
    pub fn read_key(&mut self) -> io::Result<Option<Key>> {
        let mut state = DecodeState::Start;
        loop {
            state = match state {
                DecodeState::Start => match self.source.read_byte()? {
                    None => return Ok(None),
                    Some(ESC) => DecodeState::SawEscape,
                    Some(byte) => return Ok(Some(Key::from_byte(byte))),
                },
                DecodeState::SawEscape => match self.follow_up() {
                    Some(b'[') => DecodeState::SawBracket,
                    _ => return Ok(Some(Key::Escape)),
                },
                DecodeState::SawBracket => match self.follow_up() {
                    Some(b'A') => return Ok(Some(Key::Up)),
                    Some(b'B') => return Ok(Some(Key::Down)),
                    Some(b'C') => return Ok(Some(Key::Right)),
                    Some(b'D') => return Ok(Some(Key::Left)),
                    Some(digit @ b'0'..=b'9') => DecodeState::SawDigit(digit),
                    _ => return Ok(Some(Key::Escape)),
                },
                DecodeState::SawDigit(digit) => {
                    return Ok(Some(match (digit, self.follow_up()) {
                        (b'3', Some(b'~')) => Key::Delete,
                        _ => Key::Escape,
                    }));
                }
            };
        }
    }

    fn follow_up(&mut self) -> Option<u8> {
        self.source.read_byte().ok().flatten()
    }
}
