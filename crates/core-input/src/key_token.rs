use core_events::NamedKey;

/// Map the digit of an `ESC [ <digit> ~` sequence.
pub(crate) fn map_csi_digit(digit: u8) -> Option<NamedKey> {
    let key = match digit {
        b'1' | b'7' => NamedKey::Home,
        b'3' => NamedKey::Delete,
        b'4' | b'8' => NamedKey::End,
        b'5' => NamedKey::PageUp,
        b'6' => NamedKey::PageDown,
        _ => return None,
    };
    Some(key)
}

/// Map the final byte of an `ESC [ <letter>` sequence.
pub(crate) fn map_csi_letter(letter: u8) -> Option<NamedKey> {
    let key = match letter {
        b'A' => NamedKey::Up,
        b'B' => NamedKey::Down,
        b'C' => NamedKey::Right,
        b'D' => NamedKey::Left,
        b'H' => NamedKey::Home,
        b'F' => NamedKey::End,
        _ => return None,
    };
    Some(key)
}

/// Map the final byte of an `ESC O <letter>` sequence.
pub(crate) fn map_ss3_letter(letter: u8) -> Option<NamedKey> {
    match letter {
        b'H' => Some(NamedKey::Home),
        b'F' => Some(NamedKey::End),
        _ => None,
    }
}

/// Second byte of a sequence that introduces `map_ss3_letter`. Some terminal
/// descriptions spell the SS3 introducer as the digit zero.
pub(crate) fn is_ss3_introducer(b: u8) -> bool {
    b == b'O' || b == b'0'
}
