//! Save and quit.

use super::{DispatchResult, Dispatcher};
use super::prompt::Prompt;
use crate::io_ops::{DocumentStore, WriteFileResult, write_file};
use core_model::EditorModel;

pub(crate) fn save(
    dispatcher: &mut Dispatcher,
    model: &mut EditorModel,
    store: &mut dyn DocumentStore,
) -> DispatchResult {
    match write_file(model.state_mut(), store) {
        WriteFileResult::NoFilename => {
            dispatcher.open_prompt(Prompt::save_as(), model);
            DispatchResult::clean()
        }
        WriteFileResult::Success(_) | WriteFileResult::Error(_) => DispatchResult::clean(),
    }
}

/// A dirty document needs `quit_times` extra presses; each one is announced.
pub(crate) fn quit(dispatcher: &mut Dispatcher, model: &mut EditorModel) -> DispatchResult {
    if model.document().is_dirty() && dispatcher.quit_remaining > 0 {
        let remaining = dispatcher.quit_remaining;
        model.state_mut().set_status(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {remaining} more times to quit."
        ));
        dispatcher.quit_remaining -= 1;
        tracing::debug!(target: "actions.dispatch", remaining, "quit_blocked_dirty");
        return DispatchResult::clean();
    }
    tracing::info!(target: "actions.dispatch", dirty = model.document().is_dirty(), "quit");
    DispatchResult::quit()
}
