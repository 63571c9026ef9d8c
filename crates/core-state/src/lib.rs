//! Editor state: the open document, its file association, and the transient
//! status message.
//!
//! Cursor and viewport live in `core-model`; this crate stays document-centric.
//! There is exactly one document per process and no global state: callers
//! thread `&mut EditorState` (usually via `EditorModel`) through dispatch and
//! rendering.

use core_text::{DEFAULT_TAB_STOP, Document};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod status;
pub use status::StatusMessage;

/// Editing options resolved by the binary from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    pub tab_stop: usize,
    pub quit_times: u8,
    pub message_timeout: Duration,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            quit_times: 3,
            message_timeout: status::DEFAULT_MESSAGE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorState {
    pub document: Document,
    pub file_name: Option<PathBuf>,
    pub status: StatusMessage,
    pub options: EditorOptions,
}

impl EditorState {
    /// Empty, unnamed document.
    pub fn new(options: EditorOptions) -> Self {
        Self::with_document(Document::new(options.tab_stop), None, options)
    }

    pub fn with_document(
        document: Document,
        file_name: Option<PathBuf>,
        options: EditorOptions,
    ) -> Self {
        Self {
            document,
            file_name,
            status: StatusMessage::new(options.message_timeout),
            options,
        }
    }

    /// Set the transient status message, stamped with the current time.
    pub fn set_status<S: Into<String>>(&mut self, text: S) {
        self.status.set(text, Instant::now());
    }

    /// File name as shown to the user (full path as given, lossily decoded).
    pub fn display_name(&self) -> Option<String> {
        self.file_name
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
    }
}
