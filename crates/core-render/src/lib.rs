//! Screen composition and emission.
//!
//! Every refresh repaints the whole screen: reconcile the viewport, build the
//! frame into one byte buffer (`frame`), then hand it to the terminal in a
//! single write (`writer`). There is no diffing against the previous frame;
//! erase-to-end-of-line on every row keeps stale text from surviving.
//!
//! Exposed Components:
//! - `frame`: text rows, welcome banner, status line, message line, cursor.
//! - `status`: status line segments and formatting.
//! - `writer`: `write_all` + flush of a finished frame.

use anyhow::Result;
use core_model::EditorModel;
use std::io::Write;
use std::time::Instant;

pub mod frame;
pub mod status;
pub mod writer;

pub use frame::compose_frame;
pub use writer::write_frame;

/// Scroll the viewport to the cursor and draw one full frame to `out`.
pub fn refresh_screen<W: Write>(model: &mut EditorModel, out: &mut W, now: Instant) -> Result<()> {
    model.scroll();
    let frame = compose_frame(model, now)?;
    write_frame(out, &frame)
}
