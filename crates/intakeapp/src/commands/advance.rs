use crate::commands::{degraded_notice, CmdMessage, CmdResult};
use crate::store::backend::DraftStorage;
use crate::store::DraftStore;
use crate::validation::validate;

/// Validate the current step and, if it passes, move to the next one.
///
/// On failure the step stays put and the field report is published. Entered data
/// is never touched either way.
pub fn run<S: DraftStorage>(store: &mut DraftStore<S>) -> CmdResult {
    let from = store.step();
    let report = validate(store.draft(), from);
    let passed = report.passes();
    store.publish_errors(report);

    let mut result = CmdResult::default();
    if passed {
        let to = from.next();
        store.set_step(to);
        if to == from {
            result.add_message(CmdMessage::info(
                "Already on the last step. Submit when ready.",
            ));
        } else {
            result.add_message(CmdMessage::success(format!("Moved to {}", to)));
        }
    } else {
        let count = store.errors().failures().count();
        result.add_message(CmdMessage::warning(format!(
            "{} needs attention ({} field{})",
            from.title(),
            count,
            if count == 1 { "" } else { "s" }
        )));
    }
    if store.is_degraded() {
        result.add_message(degraded_notice());
    }

    result
        .with_step(store.step())
        .with_errors(store.errors().clone())
}
