//! Terminal backend: raw mode lifecycle, stdin byte source and window size.
//!
//! Raw mode is acquired through crossterm and released by `TerminalGuard` on
//! drop, so every exit path (normal quit, `?` propagation, panic unwind)
//! restores the original terminal attributes.

use crossterm::{
    cursor::{MoveTo, Show},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
        disable_raw_mode, enable_raw_mode,
    },
};
use std::io::{self, stdout};
use thiserror::Error;

pub mod size;
pub mod stdin;

pub use size::{WindowSize, query_cursor_size, window_size};
pub use stdin::StdinBytes;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("failed to enable raw mode: {0}")]
    EnableRaw(#[source] io::Error),
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
    #[error("terminal write failed: {0}")]
    Write(#[source] io::Error),
    #[error("failed to determine window size")]
    WindowSize(#[source] io::Error),
    #[error("unparseable cursor position report")]
    CursorReport,
}

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<(), TerminalError>;
    fn leave(&mut self) -> Result<(), TerminalError>;
    fn set_title(&mut self, title: &str) -> Result<(), TerminalError>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>, TerminalError> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<(), TerminalError> {
        if !self.entered {
            enable_raw_mode().map_err(TerminalError::EnableRaw)?;
            if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
                let _ = disable_raw_mode();
                return Err(TerminalError::EnableRaw(e));
            }
            self.entered = true;
            tracing::debug!(target: "terminal", "raw_mode_enabled");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<(), TerminalError> {
        if self.entered {
            // Flip first so a failing restore is not retried from Drop.
            self.entered = false;
            let screen = execute!(
                stdout(),
                Clear(ClearType::All),
                MoveTo(0, 0),
                Show,
                LeaveAlternateScreen
            );
            let raw = disable_raw_mode();
            tracing::debug!(target: "terminal", "raw_mode_disabled");
            screen.map_err(TerminalError::Restore)?;
            raw.map_err(TerminalError::Restore)?;
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), TerminalError> {
        execute!(stdout(), SetTitle(title)).map_err(TerminalError::Write)
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl TerminalGuard<'_> {
    /// Restore now and surface the error instead of swallowing it in `Drop`.
    pub fn release(mut self) -> Result<(), TerminalError> {
        self.active = false;
        self.backend.leave()
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}
