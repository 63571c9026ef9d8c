//! Terminal dimensions.
//!
//! `crossterm::terminal::size` covers the normal case. When it fails or
//! reports zero columns we push the cursor to the bottom-right corner and ask
//! the terminal where it ended up (`ESC [ 6 n`), which yields the size as a
//! cursor position report `ESC [ rows ; cols R`.

use crate::TerminalError;
use core_input::ByteSource;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub cols: u16,
}

const MAX_REPORT_LEN: usize = 32;

pub fn window_size<S, W>(source: &mut S, out: &mut W) -> Result<WindowSize, TerminalError>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 => Ok(WindowSize { rows, cols }),
        result => {
            tracing::debug!(target: "terminal", ?result, "size_query_fallback");
            query_cursor_size(source, out)
        }
    }
}

/// Measure the window through a cursor position report.
pub fn query_cursor_size<S, W>(source: &mut S, out: &mut W) -> Result<WindowSize, TerminalError>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    out.write_all(b"\x1b[999C\x1b[999B\x1b[6n")
        .and_then(|()| out.flush())
        .map_err(TerminalError::WindowSize)?;

    let mut report = Vec::with_capacity(MAX_REPORT_LEN);
    while report.len() < MAX_REPORT_LEN {
        match source.read_byte().map_err(TerminalError::WindowSize)? {
            Some(b'R') => break,
            Some(b) => report.push(b),
            None => {
                return Err(TerminalError::WindowSize(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "no cursor position report",
                )));
            }
        }
    }
    parse_cursor_report(&report).ok_or(TerminalError::CursorReport)
}

/// Parse `ESC [ rows ; cols` (the trailing `R` already stripped).
pub fn parse_cursor_report(report: &[u8]) -> Option<WindowSize> {
    let body = report.strip_prefix(b"\x1b[")?;
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some(WindowSize {
        rows: rows.parse().ok()?,
        cols: cols.parse().ok()?,
    })
}
