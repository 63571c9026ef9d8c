//! Applies keys and actions to the editor model.
//!
//! Sub-modules split the work by concern: `motion` moves the cursor, `edit`
//! mutates the document, `command` handles save and quit, `prompt` and
//! `search` run the message-bar prompts. Every dispatch ends by clamping the
//! cursor back into the document, so callers can rely on
//! `cy <= num_rows` and `cx <= row_len(cy)` between keystrokes.

use crate::io_ops::DocumentStore;
use crate::{Action, translate_key};
use core_events::KeyToken;
use core_model::EditorModel;

mod command;
mod edit;
mod motion;
mod prompt;
mod search;

pub use prompt::PromptKind;
use prompt::Prompt;

/// Result of dispatching a single key or `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The document content changed.
    pub edited: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self {
            edited: false,
            quit: false,
        }
    }
    pub fn edited() -> Self {
        Self {
            edited: true,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            edited: false,
            quit: true,
        }
    }
}

#[derive(Debug)]
pub struct Dispatcher {
    prompt: Option<Prompt>,
    quit_times: u8,
    quit_remaining: u8,
}

impl Dispatcher {
    pub fn new(quit_times: u8) -> Self {
        Self {
            prompt: None,
            quit_times,
            quit_remaining: quit_times,
        }
    }

    /// The prompt currently capturing keys, if any.
    pub fn prompt_kind(&self) -> Option<PromptKind> {
        self.prompt.as_ref().map(Prompt::kind)
    }

    /// Route one decoded key: to the open prompt if there is one, otherwise
    /// through `translate_key`. Unbound keys are ignored.
    pub fn dispatch_key(
        &mut self,
        key: KeyToken,
        model: &mut EditorModel,
        store: &mut dyn DocumentStore,
    ) -> DispatchResult {
        if let Some(prompt) = self.prompt.take() {
            self.prompt = prompt::handle_prompt_key(prompt, key, model, store);
            model.clamp_cursor();
            return DispatchResult::clean();
        }
        match translate_key(&key) {
            Some(action) => self.dispatch(action, model, store),
            None => {
                tracing::trace!(target: "actions.dispatch", %key, "unbound_key");
                self.quit_remaining = self.quit_times;
                DispatchResult::clean()
            }
        }
    }

    pub fn dispatch(
        &mut self,
        action: Action,
        model: &mut EditorModel,
        store: &mut dyn DocumentStore,
    ) -> DispatchResult {
        if action != Action::Quit {
            self.quit_remaining = self.quit_times;
        }
        let result = match action {
            Action::Motion(kind) => motion::handle_motion(kind, model),
            Action::Edit(kind) => edit::handle_edit(kind, model),
            Action::Save => command::save(self, model, store),
            Action::Find => {
                self.open_prompt(Prompt::find(model), model);
                DispatchResult::clean()
            }
            Action::Quit => command::quit(self, model),
        };
        model.clamp_cursor();
        result
    }

    fn open_prompt(&mut self, prompt: Prompt, model: &mut EditorModel) {
        tracing::debug!(target: "actions.prompt", kind = ?prompt.kind(), "prompt_open");
        model.state_mut().set_status(prompt.status_line());
        self.prompt = Some(prompt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io_ops::MemoryStore;
    use core_events::{ENTER, NamedKey, ctrl};
    use core_model::{Cursor, Viewport};
    use core_state::{EditorOptions, EditorState};
    use core_text::Document;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    fn model(lines: &[&str], file: Option<&str>) -> EditorModel {
        let doc = Document::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()), 8);
        let st = EditorState::with_document(doc, file.map(PathBuf::from), EditorOptions::default());
        EditorModel::new(st, Viewport::new(10, 80))
    }

    fn press(d: &mut Dispatcher, m: &mut EditorModel, s: &mut MemoryStore, key: KeyToken) -> DispatchResult {
        d.dispatch_key(key, m, s)
    }

    fn type_str(d: &mut Dispatcher, m: &mut EditorModel, s: &mut MemoryStore, text: &str) {
        for b in text.bytes() {
            press(d, m, s, KeyToken::Char(b));
        }
    }

    #[test]
    fn clean_document_quits_immediately() {
        let mut d = Dispatcher::new(3);
        let mut m = model(&["x"], None);
        let r = press(&mut d, &mut m, &mut MemoryStore::new(), KeyToken::ctrl(b'q'));
        assert!(r.quit);
    }

    #[test]
    fn dirty_document_needs_confirmation() {
        let mut d = Dispatcher::new(3);
        let mut s = MemoryStore::new();
        let mut m = model(&["x"], None);
        press(&mut d, &mut m, &mut s, KeyToken::Char(b'a'));
        for remaining in [3, 2, 1] {
            let r = press(&mut d, &mut m, &mut s, KeyToken::ctrl(b'q'));
            assert!(!r.quit);
            assert_eq!(
                m.state().status.text(),
                format!(
                    "WARNING!!! File has unsaved changes. Press Ctrl-Q {remaining} more times to quit."
                )
            );
        }
        assert!(press(&mut d, &mut m, &mut s, KeyToken::ctrl(b'q')).quit);
    }

    #[test]
    fn other_key_resets_quit_confirmation() {
        let mut d = Dispatcher::new(1);
        let mut s = MemoryStore::new();
        let mut m = model(&["x"], None);
        press(&mut d, &mut m, &mut s, KeyToken::Char(b'a'));
        assert!(!press(&mut d, &mut m, &mut s, KeyToken::ctrl(b'q')).quit);
        press(&mut d, &mut m, &mut s, KeyToken::Named(NamedKey::Left));
        assert!(!press(&mut d, &mut m, &mut s, KeyToken::ctrl(b'q')).quit);
        assert!(press(&mut d, &mut m, &mut s, KeyToken::ctrl(b'q')).quit);
    }

    #[test]
    fn save_with_name_writes_and_cleans() {
        let mut d = Dispatcher::new(3);
        let mut s = MemoryStore::new();
        let mut m = model(&["abc"], Some("a.txt"));
        press(&mut d, &mut m, &mut s, KeyToken::Char(b'!'));
        assert!(m.document().is_dirty());
        press(&mut d, &mut m, &mut s, KeyToken::ctrl(b's'));
        assert_eq!(s.content(Path::new("a.txt")), Some(&b"!abc\n"[..]));
        assert!(!m.document().is_dirty());
        assert_eq!(m.state().status.text(), "5 bytes written to disk");
        assert_eq!(d.prompt_kind(), None);
    }

    #[test]
    fn save_without_name_prompts_then_writes() {
        let mut d = Dispatcher::new(3);
        let mut s = MemoryStore::new();
        let mut m = model(&[], None);
        type_str(&mut d, &mut m, &mut s, "hi");
        press(&mut d, &mut m, &mut s, KeyToken::ctrl(b's'));
        assert_eq!(d.prompt_kind(), Some(PromptKind::SaveAs));
        assert_eq!(m.state().status.text(), "Save as:  (ESC to cancel)");

        type_str(&mut d, &mut m, &mut s, "out.tx");
        press(&mut d, &mut m, &mut s, KeyToken::Char(b'x'));
        press(&mut d, &mut m, &mut s, KeyToken::Char(core_events::BACKSPACE));
        press(&mut d, &mut m, &mut s, KeyToken::Char(b't'));
        assert_eq!(m.state().status.text(), "Save as: out.txt (ESC to cancel)");
        assert!(s.files.is_empty(), "prompt keys must not edit or save");
        assert_eq!(m.document().rows_to_flat_text(), b"hi\n");

        press(&mut d, &mut m, &mut s, KeyToken::Char(ENTER));
        assert_eq!(d.prompt_kind(), None);
        assert_eq!(m.state().file_name.as_deref(), Some(Path::new("out.txt")));
        assert_eq!(s.content(Path::new("out.txt")), Some(&b"hi\n"[..]));
        assert_eq!(m.state().status.text(), "3 bytes written to disk");
    }

    #[test]
    fn empty_save_as_enter_keeps_prompt_and_escape_aborts() {
        let mut d = Dispatcher::new(3);
        let mut s = MemoryStore::new();
        let mut m = model(&["x"], None);
        press(&mut d, &mut m, &mut s, KeyToken::ctrl(b's'));
        press(&mut d, &mut m, &mut s, KeyToken::Char(ENTER));
        assert_eq!(d.prompt_kind(), Some(PromptKind::SaveAs));
        press(&mut d, &mut m, &mut s, KeyToken::Named(NamedKey::Esc));
        assert_eq!(d.prompt_kind(), None);
        assert_eq!(m.state().status.text(), "Save aborted");
        assert!(m.state().file_name.is_none());
        assert!(s.files.is_empty());
    }

    #[test]
    fn failed_save_reports_error() {
        let mut d = Dispatcher::new(3);
        let mut s = MemoryStore {
            failing: vec![PathBuf::from("ro.txt")],
            ..MemoryStore::default()
        };
        let mut m = model(&["x"], Some("ro.txt"));
        press(&mut d, &mut m, &mut s, KeyToken::Char(b'y'));
        press(&mut d, &mut m, &mut s, KeyToken::ctrl(b's'));
        assert!(m.state().status.text().starts_with("Can't save! I/O error:"));
        assert!(m.document().is_dirty());
    }

    #[test]
    fn find_moves_to_match_and_enter_keeps_it() {
        let mut d = Dispatcher::new(3);
        let mut s = MemoryStore::new();
        let mut m = model(&["alpha", "beta", "gamma beta"], None);
        press(&mut d, &mut m, &mut s, KeyToken::ctrl(b'f'));
        assert_eq!(d.prompt_kind(), Some(PromptKind::Find));
        type_str(&mut d, &mut m, &mut s, "beta");
        assert_eq!(m.cursor(), Cursor::new(0, 1));
        assert_eq!(m.viewport().rowoff, 3);
        assert_eq!(
            m.state().status.text(),
            "Search: beta (Use ESC/Arrows/Enter)"
        );

        press(&mut d, &mut m, &mut s, KeyToken::Named(NamedKey::Down));
        assert_eq!(m.cursor(), Cursor::new(6, 2));
        press(&mut d, &mut m, &mut s, KeyToken::Named(NamedKey::Right));
        assert_eq!(m.cursor(), Cursor::new(0, 1), "search wraps around");
        press(&mut d, &mut m, &mut s, KeyToken::Named(NamedKey::Up));
        assert_eq!(m.cursor(), Cursor::new(6, 2));

        press(&mut d, &mut m, &mut s, KeyToken::Char(ENTER));
        assert_eq!(d.prompt_kind(), None);
        assert_eq!(m.cursor(), Cursor::new(6, 2));
        m.scroll();
        assert_eq!(m.viewport().rowoff, 2);
        assert!(!m.document().is_dirty());
    }

    #[test]
    fn find_escape_restores_cursor_and_viewport() {
        let mut d = Dispatcher::new(3);
        let mut s = MemoryStore::new();
        let mut m = model(&["one", "two", "three"], None);
        *m.cursor_mut() = Cursor::new(1, 0);
        m.scroll();
        let before_vp = *m.viewport();
        press(&mut d, &mut m, &mut s, KeyToken::ctrl(b'f'));
        type_str(&mut d, &mut m, &mut s, "thr");
        assert_eq!(m.cursor(), Cursor::new(0, 2));
        press(&mut d, &mut m, &mut s, KeyToken::Named(NamedKey::Esc));
        assert_eq!(m.cursor(), Cursor::new(1, 0));
        assert_eq!(*m.viewport(), before_vp);
        assert_eq!(m.state().status.text(), "");
    }

    #[test]
    fn find_without_match_leaves_cursor() {
        let mut d = Dispatcher::new(3);
        let mut s = MemoryStore::new();
        let mut m = model(&["one"], None);
        *m.cursor_mut() = Cursor::new(2, 0);
        press(&mut d, &mut m, &mut s, KeyToken::ctrl(b'f'));
        type_str(&mut d, &mut m, &mut s, "zz");
        assert_eq!(m.cursor(), Cursor::new(2, 0));
    }

    #[test]
    fn ignored_keys_do_nothing() {
        let mut d = Dispatcher::new(3);
        let mut s = MemoryStore::new();
        let mut m = model(&["abc"], None);
        for key in [KeyToken::ctrl(b'l'), KeyToken::Named(NamedKey::Esc)] {
            assert_eq!(press(&mut d, &mut m, &mut s, key), DispatchResult::clean());
        }
        assert_eq!(m.cursor(), Cursor::new(0, 0));
        assert!(!m.document().is_dirty());
    }

    #[test]
    fn ctrl_h_deletes_like_backspace() {
        let mut d = Dispatcher::new(3);
        let mut s = MemoryStore::new();
        let mut m = model(&["abc"], None);
        *m.cursor_mut() = Cursor::new(3, 0);
        let r = press(&mut d, &mut m, &mut s, KeyToken::Char(ctrl(b'h')));
        assert!(r.edited);
        assert_eq!(m.document().rows_to_flat_text(), b"ab\n");
    }
}
