//! Logical/visual column projection.
//!
//! A row's logical form is its raw bytes; its visual form replaces every tab
//! with spaces up to the next tab-stop boundary. `expand_tabs` and `cx_to_rx`
//! walk the bytes with the same advance rule, so the cursor column computed by
//! one always lands on the cell produced by the other.

pub const DEFAULT_TAB_STOP: usize = 8;

/// A tab stop of zero would make every tab zero-width; treat it as one.
#[inline]
pub fn normalize_tab_stop(tab_stop: usize) -> usize {
    tab_stop.max(1)
}

#[inline]
fn advance(visual: usize, byte: u8, tab_stop: usize) -> usize {
    if byte == b'\t' {
        visual + (tab_stop - visual % tab_stop)
    } else {
        visual + 1
    }
}

/// Build the display form of `chars`.
pub fn expand_tabs(chars: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = normalize_tab_stop(tab_stop);
    let tabs = chars.iter().filter(|&&b| b == b'\t').count();
    let mut out = Vec::with_capacity(chars.len() + tabs * (tab_stop - 1));
    for &b in chars {
        if b == b'\t' {
            let next = advance(out.len(), b, tab_stop);
            out.resize(next, b' ');
        } else {
            out.push(b);
        }
    }
    out
}

/// Visual column of logical column `cx`. `cx` past the end is clamped.
pub fn cx_to_rx(chars: &[u8], cx: usize, tab_stop: usize) -> usize {
    let tab_stop = normalize_tab_stop(tab_stop);
    let end = cx.min(chars.len());
    chars[..end]
        .iter()
        .fold(0, |rx, &b| advance(rx, b, tab_stop))
}

/// Logical column whose visual span contains `rx`; `chars.len()` when `rx` is
/// past the rendered width.
pub fn rx_to_cx(chars: &[u8], rx: usize, tab_stop: usize) -> usize {
    let tab_stop = normalize_tab_stop(tab_stop);
    let mut cur = 0;
    for (cx, &b) in chars.iter().enumerate() {
        cur = advance(cur, b, tab_stop);
        if cur > rx {
            return cx;
        }
    }
    chars.len()
}
