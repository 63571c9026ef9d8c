//! Keystroke interpretation and command execution.
//!
//! A decoded `KeyToken` is first translated into an `Action` (pure mapping,
//! see `key_translator`), then applied to the `EditorModel` by the
//! `Dispatcher`. The dispatcher owns the little interaction state the editor
//! has: the pending quit confirmation and the active prompt (save-as or
//! incremental find). While a prompt is open, keys are routed to it instead of
//! being translated.
//!
//! Persistence goes through the `DocumentStore` trait in `io_ops` so that
//! dispatch can be exercised without touching the filesystem.

pub mod dispatcher;
pub mod io_ops;
mod key_translator;

pub use dispatcher::{DispatchResult, Dispatcher, PromptKind};
pub use io_ops::{DocumentStore, FsStore, MemoryStore};
pub use key_translator::translate_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertByte(u8),
    InsertNewline,
    /// Delete the byte left of the cursor, merging rows at column zero.
    Backspace,
    /// Delete the byte under the cursor, merging the next row at row end.
    DeleteUnder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Save,
    Find,
    Quit,
}
