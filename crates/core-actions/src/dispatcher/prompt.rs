//! Single-line prompt shown in the message bar.
//!
//! The prompt collects bytes until Enter (non-empty input only) or Escape.
//! Its text is re-published as the status message after every key. The find
//! prompt searches on every keystroke; see `search`.

use super::search::FindState;
use crate::io_ops::{DocumentStore, write_file};
use core_events::{BACKSPACE, ENTER, KeyToken, NamedKey, ctrl};
use core_model::EditorModel;
use std::path::PathBuf;

const CTRL_H: u8 = ctrl(b'h');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    SaveAs,
    Find,
}

#[derive(Debug, Clone)]
enum PromptMode {
    SaveAs,
    Find(FindState),
}

#[derive(Debug, Clone)]
pub(crate) struct Prompt {
    mode: PromptMode,
    buffer: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptStep {
    Continue,
    Accept,
    Cancel,
}

impl Prompt {
    pub(crate) fn save_as() -> Self {
        Self {
            mode: PromptMode::SaveAs,
            buffer: Vec::new(),
        }
    }

    /// Find prompt remembering where the cursor and viewport were.
    pub(crate) fn find(model: &EditorModel) -> Self {
        Self {
            mode: PromptMode::Find(FindState::new(model.cursor(), *model.viewport())),
            buffer: Vec::new(),
        }
    }

    pub(crate) fn kind(&self) -> PromptKind {
        match self.mode {
            PromptMode::SaveAs => PromptKind::SaveAs,
            PromptMode::Find(_) => PromptKind::Find,
        }
    }

    pub(crate) fn status_line(&self) -> String {
        let input = String::from_utf8_lossy(&self.buffer);
        match self.mode {
            PromptMode::SaveAs => format!("Save as: {input} (ESC to cancel)"),
            PromptMode::Find(_) => format!("Search: {input} (Use ESC/Arrows/Enter)"),
        }
    }
}

/// Feed one key to the open prompt. Returns the prompt back if it stays open.
pub(crate) fn handle_prompt_key(
    mut prompt: Prompt,
    key: KeyToken,
    model: &mut EditorModel,
    store: &mut dyn DocumentStore,
) -> Option<Prompt> {
    let step = match key {
        KeyToken::Named(NamedKey::Delete) | KeyToken::Char(BACKSPACE | CTRL_H) => {
            prompt.buffer.pop();
            PromptStep::Continue
        }
        KeyToken::Named(NamedKey::Esc) => PromptStep::Cancel,
        KeyToken::Char(ENTER) if !prompt.buffer.is_empty() => PromptStep::Accept,
        other => {
            if let Some(b) = other.prompt_byte() {
                prompt.buffer.push(b);
            }
            PromptStep::Continue
        }
    };

    if let PromptMode::Find(find) = &mut prompt.mode {
        find.on_key(&prompt.buffer, &key, model);
    }

    match step {
        PromptStep::Continue => {
            model.state_mut().set_status(prompt.status_line());
            Some(prompt)
        }
        PromptStep::Accept => {
            model.state_mut().status.clear();
            accept(prompt, model, store);
            None
        }
        PromptStep::Cancel => {
            model.state_mut().status.clear();
            cancel(prompt, model);
            None
        }
    }
}

fn accept(prompt: Prompt, model: &mut EditorModel, store: &mut dyn DocumentStore) {
    match prompt.mode {
        PromptMode::SaveAs => {
            let name = PathBuf::from(String::from_utf8_lossy(&prompt.buffer).into_owned());
            tracing::debug!(target: "actions.prompt", path = %name.display(), "save_as");
            let state = model.state_mut();
            state.file_name = Some(name);
            write_file(state, store);
        }
        PromptMode::Find(_) => {}
    }
}

fn cancel(prompt: Prompt, model: &mut EditorModel) {
    match prompt.mode {
        PromptMode::SaveAs => model.state_mut().set_status("Save aborted"),
        PromptMode::Find(find) => find.restore(model),
    }
}
