//! Text edits at the cursor.

use super::DispatchResult;
use crate::EditKind;
use core_model::{Cursor, EditorModel};
use core_text::Document;

pub(crate) fn handle_edit(kind: EditKind, model: &mut EditorModel) -> DispatchResult {
    let (state, cursor, _) = model.parts_mut();
    let doc = &mut state.document;
    let before = *cursor;
    let changed = match kind {
        EditKind::InsertByte(b) => {
            insert_byte(doc, cursor, b);
            true
        }
        EditKind::InsertNewline => {
            insert_newline(doc, cursor);
            true
        }
        EditKind::Backspace => backspace(doc, cursor),
        EditKind::DeleteUnder => delete_under(doc, cursor),
    };
    if !changed {
        return DispatchResult::clean();
    }
    let op = match kind {
        EditKind::InsertByte(_) => "insert_byte",
        EditKind::InsertNewline => "insert_newline",
        EditKind::Backspace => "backspace",
        EditKind::DeleteUnder => "delete_under",
    };
    tracing::trace!(target: "actions.dispatch", op, cx=before.cx, cy=before.cy, to_cx=cursor.cx, to_cy=cursor.cy, "edit");
    DispatchResult::edited()
}

/// Typing on the virtual row first materializes it.
fn insert_byte(doc: &mut Document, cursor: &mut Cursor, b: u8) {
    if cursor.cy == doc.num_rows() {
        doc.insert_row(cursor.cy, Vec::new());
    }
    doc.insert_char(cursor.cy, cursor.cx, b);
    cursor.cx += 1;
}

fn insert_newline(doc: &mut Document, cursor: &mut Cursor) {
    if cursor.cx == 0 {
        doc.insert_row(cursor.cy, Vec::new());
    } else {
        doc.split_row(cursor.cy, cursor.cx);
    }
    cursor.cy += 1;
    cursor.cx = 0;
}

fn backspace(doc: &mut Document, cursor: &mut Cursor) -> bool {
    if cursor.cy >= doc.num_rows() || (cursor.cx == 0 && cursor.cy == 0) {
        return false;
    }
    if cursor.cx > 0 {
        doc.delete_char(cursor.cy, cursor.cx - 1);
        cursor.cx -= 1;
    } else {
        let prev_len = doc.row_len(cursor.cy - 1);
        doc.join_with_previous(cursor.cy);
        cursor.cy -= 1;
        cursor.cx = prev_len;
    }
    true
}

fn delete_under(doc: &mut Document, cursor: &mut Cursor) -> bool {
    let num_rows = doc.num_rows();
    if cursor.cy >= num_rows {
        return false;
    }
    if cursor.cx < doc.row_len(cursor.cy) {
        doc.delete_char(cursor.cy, cursor.cx);
    } else if cursor.cy + 1 < num_rows {
        doc.join_with_previous(cursor.cy + 1);
    } else {
        return false;
    }
    true
}
