//! Full-screen frame composition.
//!
//! Layout, top to bottom: `screenrows` text rows, the inverse-video status
//! line, the message line. Every text row and the status line end with
//! erase-to-end-of-line and `\r\n`; the message line has no trailing newline
//! so the terminal never scrolls. The cursor is hidden while drawing and
//! shown again at its final position.

use crate::status::{StatusContext, build_status};
use core_model::EditorModel;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io;
use std::time::Instant;

pub const BANNER_PREFIX: &str = "Kiln editor -- version ";

fn banner() -> String {
    format!("{BANNER_PREFIX}{}", env!("CARGO_PKG_VERSION"))
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// Bytes of the longest prefix of `s` that fits in `max` bytes without
/// splitting a character.
fn truncate_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    &s[..cut]
}

/// Compose the whole screen for the model's current viewport. Call
/// `EditorModel::scroll` first so offsets and `rx` are current.
pub fn compose_frame(model: &EditorModel, now: Instant) -> io::Result<Vec<u8>> {
    let vp = *model.viewport();
    let mut buf: Vec<u8> = Vec::with_capacity((vp.screenrows + 2) * (vp.screencols + 8));
    queue!(buf, Hide, MoveTo(0, 0))?;
    draw_rows(model, &mut buf)?;
    draw_status_bar(model, &mut buf)?;
    draw_message_bar(model, now, &mut buf)?;
    let cursor = model.cursor();
    queue!(
        buf,
        MoveTo(
            to_u16(model.rx().saturating_sub(vp.coloff)),
            to_u16(cursor.cy.saturating_sub(vp.rowoff)),
        ),
        Show
    )?;
    Ok(buf)
}

fn draw_rows(model: &EditorModel, buf: &mut Vec<u8>) -> io::Result<()> {
    let vp = model.viewport();
    let doc = model.document();
    for y in 0..vp.screenrows {
        let filerow = y + vp.rowoff;
        match doc.row(filerow) {
            Some(row) => {
                let render = row.render();
                if vp.coloff < render.len() {
                    let end = render.len().min(vp.coloff + vp.screencols);
                    buf.extend_from_slice(&render[vp.coloff..end]);
                }
            }
            None if doc.is_empty() && y == vp.screenrows / 3 => {
                let banner = banner();
                let text = truncate_str(&banner, vp.screencols);
                let mut padding = (vp.screencols - text.len()) / 2;
                if padding > 0 {
                    buf.push(b'~');
                    padding -= 1;
                }
                buf.extend(std::iter::repeat_n(b' ', padding));
                buf.extend_from_slice(text.as_bytes());
            }
            None => buf.push(b'~'),
        }
        queue!(buf, Clear(ClearType::UntilNewLine))?;
        buf.extend_from_slice(b"\r\n");
    }
    Ok(())
}

fn draw_status_bar(model: &EditorModel, buf: &mut Vec<u8>) -> io::Result<()> {
    let name = model.state().display_name();
    let doc = model.document();
    let ctx = StatusContext {
        file_name: name.as_deref(),
        num_rows: doc.num_rows(),
        cy: model.cursor().cy,
        dirty: doc.is_dirty(),
    };
    let line = build_status(&ctx, model.viewport().screencols);
    queue!(buf, SetAttribute(Attribute::Reverse))?;
    buf.extend_from_slice(line.as_bytes());
    queue!(buf, SetAttribute(Attribute::Reset), Clear(ClearType::UntilNewLine))?;
    buf.extend_from_slice(b"\r\n");
    Ok(())
}

fn draw_message_bar(model: &EditorModel, now: Instant, buf: &mut Vec<u8>) -> io::Result<()> {
    queue!(buf, Clear(ClearType::UntilNewLine))?;
    if let Some(msg) = model.state().status.visible(now) {
        buf.extend_from_slice(truncate_str(msg, model.viewport().screencols).as_bytes());
    }
    Ok(())
}
