//! Key token to `Action` mapping for the editing (non-prompt) state.
//!
//! Stateless: every binding is a single key. Tokens without a binding map to
//! `None` and are ignored by the dispatcher (this covers Escape, Ctrl-L and
//! control bytes other than Tab).

use crate::{Action, EditKind, MotionKind};
use core_events::{BACKSPACE, ENTER, KeyToken, NamedKey, ctrl};

const CTRL_F: u8 = ctrl(b'f');
const CTRL_H: u8 = ctrl(b'h');
const CTRL_Q: u8 = ctrl(b'q');
const CTRL_S: u8 = ctrl(b's');
const TAB: u8 = b'\t';

pub fn translate_key(key: &KeyToken) -> Option<Action> {
    let action = match *key {
        KeyToken::Named(named) => match named {
            NamedKey::Left => Action::Motion(MotionKind::Left),
            NamedKey::Right => Action::Motion(MotionKind::Right),
            NamedKey::Up => Action::Motion(MotionKind::Up),
            NamedKey::Down => Action::Motion(MotionKind::Down),
            NamedKey::Home => Action::Motion(MotionKind::LineStart),
            NamedKey::End => Action::Motion(MotionKind::LineEnd),
            NamedKey::PageUp => Action::Motion(MotionKind::PageUp),
            NamedKey::PageDown => Action::Motion(MotionKind::PageDown),
            NamedKey::Delete => Action::Edit(EditKind::DeleteUnder),
            NamedKey::Esc => return None,
        },
        KeyToken::Char(ENTER) => Action::Edit(EditKind::InsertNewline),
        KeyToken::Char(BACKSPACE | CTRL_H) => Action::Edit(EditKind::Backspace),
        KeyToken::Char(CTRL_Q) => Action::Quit,
        KeyToken::Char(CTRL_S) => Action::Save,
        KeyToken::Char(CTRL_F) => Action::Find,
        KeyToken::Char(TAB) => Action::Edit(EditKind::InsertByte(TAB)),
        KeyToken::Char(b) if b >= 0x20 => Action::Edit(EditKind::InsertByte(b)),
        KeyToken::Char(_) => return None,
    };
    Some(action)
}
