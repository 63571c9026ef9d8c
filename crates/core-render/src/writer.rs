//! Frame emission.
//!
//! A frame is assembled in memory first and reaches the terminal through a
//! single `write_all` (which retries short writes) followed by a flush, so the
//! terminal never shows a half-drawn screen.

use anyhow::{Context, Result};
use std::io::Write;

pub fn write_frame<W: Write>(out: &mut W, frame: &[u8]) -> Result<()> {
    out.write_all(frame).context("writing frame")?;
    out.flush().context("flushing frame")?;
    tracing::trace!(target: "render", bytes = frame.len(), "frame_written");
    Ok(())
}
