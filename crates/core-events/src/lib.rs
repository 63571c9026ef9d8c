//! Key tokens shared by the decoder and the command dispatcher.
//!
//! The decoder never interprets control bytes: Enter, Backspace and Ctrl
//! chords arrive as `KeyToken::Char` carrying the raw byte. Only escape
//! sequences are folded into `NamedKey`s. Helpers below name the bytes the
//! dispatcher binds so call sites read as keys rather than numbers.

use std::fmt;

/// Keys that only exist as multi-byte escape sequences, plus a lone Escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

/// One decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    /// A single input byte, returned verbatim (printable or control).
    Char(u8),
    Named(NamedKey),
}

pub const ESC: u8 = 0x1b;
pub const ENTER: u8 = b'\r';
pub const BACKSPACE: u8 = 127;

/// Byte produced by holding Ctrl with `key` (strips bits 5 and 6).
#[inline]
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1f
}

impl KeyToken {
    pub const fn ctrl(key: u8) -> Self {
        KeyToken::Char(ctrl(key))
    }

    pub fn is_ctrl(&self, key: u8) -> bool {
        *self == Self::ctrl(key)
    }

    /// Byte suitable for inserting into a prompt buffer: printable ASCII or
    /// any byte with the high bit set.
    pub fn prompt_byte(&self) -> Option<u8> {
        match *self {
            KeyToken::Char(b) if b >= 0x20 && b != BACKSPACE => Some(b),
            _ => None,
        }
    }
}

impl From<NamedKey> for KeyToken {
    fn from(key: NamedKey) -> Self {
        KeyToken::Named(key)
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(b) if b.is_ascii_graphic() || *b == b' ' => {
                write!(f, "'{}'", *b as char)
            }
            KeyToken::Char(b) if *b < 0x20 => write!(f, "<C-{}>", (*b | 0x60) as char),
            KeyToken::Char(b) => write!(f, "0x{b:02x}"),
            KeyToken::Named(k) => write!(f, "<{k:?}>"),
        }
    }
}
