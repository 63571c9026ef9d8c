//! File IO for the single open document.
//!
//! Synchronous and whole-file: a load reads every byte and splits it into
//! rows, a save writes `rows_to_flat_text()` in one go. The `DocumentStore`
//! seam lets dispatch tests run against `MemoryStore`.

use core_state::{EditorOptions, EditorState};
use core_text::{Document, split_lines};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub trait DocumentStore {
    /// Read `path` and return its lines without terminators.
    fn load(&mut self, path: &Path) -> io::Result<Vec<Vec<u8>>>;
    /// Replace the content of `path` with `bytes`, creating it if needed.
    /// Returns the number of bytes written.
    fn save(&mut self, path: &Path, bytes: &[u8]) -> io::Result<usize>;
}

/// Filesystem-backed store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl DocumentStore for FsStore {
    fn load(&mut self, path: &Path) -> io::Result<Vec<Vec<u8>>> {
        let mut content = Vec::new();
        std::fs::File::open(path)?.read_to_end(&mut content)?;
        Ok(split_lines(&content))
    }

    fn save(&mut self, path: &Path, bytes: &[u8]) -> io::Result<usize> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.set_len(bytes.len() as u64)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(bytes.len())
    }
}

/// In-memory store keyed by path. Paths listed in `failing` reject saves.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub files: HashMap<PathBuf, Vec<u8>>,
    pub failing: Vec<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file<P: Into<PathBuf>>(mut self, path: P, content: &[u8]) -> Self {
        self.files.insert(path.into(), content.to_vec());
        self
    }

    pub fn content(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }
}

impl DocumentStore for MemoryStore {
    fn load(&mut self, path: &Path) -> io::Result<Vec<Vec<u8>>> {
        self.files
            .get(path)
            .map(|content| split_lines(content))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No such file or directory"))
    }

    fn save(&mut self, path: &Path, bytes: &[u8]) -> io::Result<usize> {
        if self.failing.iter().any(|p| p == path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Permission denied",
            ));
        }
        self.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(bytes.len())
    }
}

/// Load `path` into a fresh, clean editor state named after it.
pub fn open_document(
    store: &mut dyn DocumentStore,
    path: &Path,
    options: EditorOptions,
) -> io::Result<EditorState> {
    let lines = store.load(path).inspect_err(|e| {
        tracing::error!(target: "io", path = %path.display(), ?e, "file_open_error");
    })?;
    let document = Document::from_lines(lines, options.tab_stop);
    tracing::info!(target: "io", path = %path.display(), rows = document.num_rows(), "file_opened");
    Ok(EditorState::with_document(
        document,
        Some(path.to_path_buf()),
        options,
    ))
}

/// Result of a save attempt.
#[derive(Debug)]
pub enum WriteFileResult {
    Success(usize),
    NoFilename,
    Error(io::Error),
}

/// Write the document to its file name and report the outcome in the status
/// message. The dirty counter is reset only when every byte was written.
pub fn write_file(state: &mut EditorState, store: &mut dyn DocumentStore) -> WriteFileResult {
    let Some(path) = state.file_name.clone() else {
        return WriteFileResult::NoFilename;
    };
    let bytes = state.document.rows_to_flat_text();
    match store.save(&path, &bytes) {
        Ok(written) => {
            state.document.mark_clean();
            state.set_status(format!("{written} bytes written to disk"));
            tracing::info!(target: "io", path = %path.display(), bytes = written, "file_written");
            WriteFileResult::Success(written)
        }
        Err(e) => {
            tracing::error!(target: "io", path = %path.display(), ?e, "file_write_error");
            state.set_status(format!("Can't save! I/O error: {e}"));
            WriteFileResult::Error(e)
        }
    }
}
