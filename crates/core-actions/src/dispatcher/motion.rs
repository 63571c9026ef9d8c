//! Cursor movement.
//!
//! Every single step ends by snapping `cx` to the length of the row it lands
//! on; there is no remembered column. Paging repeats single steps so it
//! inherits the same snapping.

use super::DispatchResult;
use crate::MotionKind;
use core_model::{Cursor, EditorModel};
use core_text::Document;

pub(crate) fn handle_motion(kind: MotionKind, model: &mut EditorModel) -> DispatchResult {
    let before = model.cursor();
    let (state, cursor, viewport) = model.parts_mut();
    let doc = &state.document;
    match kind {
        MotionKind::PageUp => {
            cursor.cy = viewport.rowoff.min(doc.num_rows());
            for _ in 0..viewport.screenrows {
                step(MotionKind::Up, doc, cursor);
            }
        }
        MotionKind::PageDown => {
            cursor.cy = (viewport.rowoff + viewport.screenrows)
                .saturating_sub(1)
                .min(doc.num_rows());
            for _ in 0..viewport.screenrows {
                step(MotionKind::Down, doc, cursor);
            }
        }
        _ => step(kind, doc, cursor),
    }
    cursor.clamp_to(doc);
    if before != *cursor {
        tracing::trace!(target: "actions.dispatch", motion=?kind, cx=before.cx, cy=before.cy, to_cx=cursor.cx, to_cy=cursor.cy, "motion");
    }
    DispatchResult::clean()
}

fn step(kind: MotionKind, doc: &Document, cursor: &mut Cursor) {
    let num_rows = doc.num_rows();
    match kind {
        MotionKind::Left => {
            if cursor.cx > 0 {
                cursor.cx -= 1;
            } else if cursor.cy > 0 {
                cursor.cy -= 1;
                cursor.cx = doc.row_len(cursor.cy);
            }
        }
        MotionKind::Right => {
            if cursor.cy < num_rows {
                if cursor.cx < doc.row_len(cursor.cy) {
                    cursor.cx += 1;
                } else if cursor.cy + 1 < num_rows {
                    cursor.cy += 1;
                    cursor.cx = 0;
                }
            }
        }
        MotionKind::Up => cursor.cy = cursor.cy.saturating_sub(1),
        MotionKind::Down => {
            if cursor.cy < num_rows {
                cursor.cy += 1;
            }
        }
        MotionKind::LineStart => cursor.cx = 0,
        MotionKind::LineEnd => {
            if cursor.cy < num_rows {
                cursor.cx = doc.row_len(cursor.cy);
            }
        }
        MotionKind::PageUp | MotionKind::PageDown => {}
    }
    cursor.clamp_to(doc);
}
