//! Incremental find.
//!
//! Each key typed into the find prompt re-runs the search. Arrow keys step to
//! the next (Right/Down) or previous (Left/Up) match from the last hit; any
//! other key restarts from the top. A hit moves the cursor there and pushes
//! `rowoff` past the end so the next scroll puts the match on the first
//! visible line. Cancelling restores the cursor and viewport from when the
//! prompt opened.

use core_events::{KeyToken, NamedKey};
use core_model::{Cursor, EditorModel, Viewport};
use core_text::Direction;

#[derive(Debug, Clone)]
pub(crate) struct FindState {
    last_match: Option<usize>,
    direction: Direction,
    saved_cursor: Cursor,
    saved_viewport: Viewport,
}

impl FindState {
    pub(crate) fn new(saved_cursor: Cursor, saved_viewport: Viewport) -> Self {
        Self {
            last_match: None,
            direction: Direction::Forward,
            saved_cursor,
            saved_viewport,
        }
    }

    pub(crate) fn on_key(&mut self, query: &[u8], key: &KeyToken, model: &mut EditorModel) {
        match key {
            KeyToken::Named(NamedKey::Esc) | KeyToken::Char(core_events::ENTER) => {
                self.last_match = None;
                self.direction = Direction::Forward;
                return;
            }
            KeyToken::Named(NamedKey::Right | NamedKey::Down) => {
                self.direction = Direction::Forward;
            }
            KeyToken::Named(NamedKey::Left | NamedKey::Up) => {
                self.direction = Direction::Backward;
            }
            _ => {
                self.last_match = None;
                self.direction = Direction::Forward;
            }
        }
        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }

        let Some(hit) = model.document().find(query, self.last_match, self.direction) else {
            return;
        };
        self.last_match = Some(hit.row);
        let num_rows = model.document().num_rows();
        *model.cursor_mut() = Cursor::new(hit.cx, hit.row);
        model.viewport_mut().rowoff = num_rows;
        tracing::trace!(target: "actions.find", row = hit.row, cx = hit.cx, direction = ?self.direction, "match");
    }

    /// Put the cursor and viewport back where the prompt found them.
    pub(crate) fn restore(self, model: &mut EditorModel) {
        *model.cursor_mut() = self.saved_cursor;
        *model.viewport_mut() = self.saved_viewport;
    }
}
