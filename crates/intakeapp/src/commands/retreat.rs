use crate::commands::{degraded_notice, CmdMessage, CmdResult};
use crate::store::backend::DraftStorage;
use crate::store::DraftStore;

/// Move back one step. No validation, and the current error report is left as is.
pub fn run<S: DraftStorage>(store: &mut DraftStore<S>) -> CmdResult {
    let from = store.step();
    let to = from.prev();
    store.set_step(to);

    let mut result = CmdResult::default();
    if to == from {
        result.add_message(CmdMessage::info("Already on the first step."));
    } else {
        result.add_message(CmdMessage::success(format!("Back to {}", to)));
    }
    if store.is_degraded() {
        result.add_message(degraded_notice());
    }
    result
        .with_step(store.step())
        .with_errors(store.errors().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::advance;
    use crate::model::{Draft, Step};
    use crate::test_utils::seeded_backend;

    #[test]
    fn test_retreat_clamps_at_first_step() {
        let mut store = DraftStore::open(seeded_backend(Draft::default(), Step::Contact));
        let result = run(&mut store);
        assert_eq!(store.step(), Step::Contact);
        assert_eq!(result.messages[0].content, "Already on the first step.");
    }

    #[test]
    fn test_retreat_skips_validation_and_keeps_errors() {
        let mut store = DraftStore::open(seeded_backend(Draft::default(), Step::Basics));
        advance::run(&mut store);
        assert!(store.errors().message("age").is_some());

        let result = run(&mut store);
        assert_eq!(store.step(), Step::Contact);
        assert!(result.errors.message("age").is_some());
    }
}
