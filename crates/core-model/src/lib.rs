//! Cursor and viewport over the single open document.
//!
//! `EditorModel` pairs the document-centric `EditorState` with presentation
//! state: the logical cursor `(cx, cy)` and the `Viewport` window. The visual
//! column `rx` is derived from `cx` by `scroll` and cached only until the next
//! reconcile; it is never written back into the cursor.
//!
//! Invariants (must hold after every public mutating call returns):
//! * `cursor.cy <= document.num_rows()`; `cy == num_rows` is the virtual row
//!   used for appending.
//! * `cursor.cx <= row_len(cy)` (zero on the virtual row).
//! * After `scroll`, `rowoff <= cy < rowoff + screenrows` and
//!   `coloff <= rx < coloff + screencols` whenever the screen is non-empty.

use core_state::EditorState;
use core_text::Document;

/// Status bar plus message bar.
pub const RESERVED_ROWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Byte offset into the row.
    pub cx: usize,
    /// Row index; may equal the row count.
    pub cy: usize,
}

impl Cursor {
    pub const fn new(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }

    /// Pull the cursor back inside the document after an edit or jump.
    pub fn clamp_to(&mut self, doc: &Document) {
        if self.cy > doc.num_rows() {
            self.cy = doc.num_rows();
        }
        let len = doc.row_len(self.cy);
        if self.cx > len {
            self.cx = len;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First visible document row.
    pub rowoff: usize,
    /// First visible visual column.
    pub coloff: usize,
    /// Text rows available (terminal rows minus `RESERVED_ROWS`).
    pub screenrows: usize,
    pub screencols: usize,
}

/// New offset along one axis so that `pos` falls inside
/// `[offset, offset + extent)`, or `None` when no scroll is needed. An empty
/// extent never scrolls.
pub fn compute_scroll_intent(offset: usize, pos: usize, extent: usize) -> Option<usize> {
    if extent == 0 {
        return None;
    }
    if pos < offset {
        Some(pos)
    } else if pos >= offset + extent {
        Some(pos + 1 - extent)
    } else {
        None
    }
}

impl Viewport {
    pub fn new(screenrows: usize, screencols: usize) -> Self {
        Self {
            rowoff: 0,
            coloff: 0,
            screenrows,
            screencols,
        }
    }

    /// Text area for a terminal of `rows` x `cols`.
    pub fn for_window(rows: u16, cols: u16) -> Self {
        let mut vp = Self::default();
        vp.resize(rows, cols);
        vp
    }

    pub fn resize(&mut self, rows: u16, cols: u16) {
        self.screenrows = usize::from(rows).saturating_sub(RESERVED_ROWS);
        self.screencols = usize::from(cols);
    }

    /// Recompute `rx` for `cursor` and scroll just enough to show it.
    /// Returns the visual column. Calling it again with the same inputs is a
    /// no-op.
    pub fn reconcile(&mut self, cursor: &Cursor, doc: &Document) -> usize {
        let rx = doc
            .row(cursor.cy)
            .map_or(0, |row| row.cx_to_rx(cursor.cx, doc.tab_stop()));
        if let Some(rowoff) = compute_scroll_intent(self.rowoff, cursor.cy, self.screenrows) {
            self.rowoff = rowoff;
        }
        if let Some(coloff) = compute_scroll_intent(self.coloff, rx, self.screencols) {
            self.coloff = coloff;
        }
        rx
    }
}

#[derive(Debug, Clone)]
pub struct EditorModel {
    state: EditorState,
    cursor: Cursor,
    viewport: Viewport,
    rx: usize,
}

impl EditorModel {
    pub fn new(state: EditorState, viewport: Viewport) -> Self {
        Self {
            state,
            cursor: Cursor::default(),
            viewport,
            rx: 0,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn document(&self) -> &Document {
        &self.state.document
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Visual column computed by the last `scroll`.
    pub fn rx(&self) -> usize {
        self.rx
    }

    /// Disjoint mutable borrows for dispatch code that edits the document
    /// while moving the cursor.
    pub fn parts_mut(&mut self) -> (&mut EditorState, &mut Cursor, &mut Viewport) {
        (&mut self.state, &mut self.cursor, &mut self.viewport)
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor.clamp_to(&self.state.document);
    }

    /// Reconcile the viewport with the cursor. Returns true if it moved.
    pub fn scroll(&mut self) -> bool {
        let before = self.viewport;
        self.rx = self.viewport.reconcile(&self.cursor, &self.state.document);
        let moved = before != self.viewport;
        if moved {
            tracing::trace!(
                target: "model.scroll",
                rowoff = self.viewport.rowoff,
                coloff = self.viewport.coloff,
                cy = self.cursor.cy,
                rx = self.rx,
                "viewport_moved"
            );
        }
        moved
    }
}
