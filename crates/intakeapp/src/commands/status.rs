use crate::commands::{degraded_notice, CmdResult};
use crate::store::backend::DraftStorage;
use crate::store::DraftStore;

pub fn run<S: DraftStorage>(store: &DraftStore<S>) -> CmdResult {
    let mut result = CmdResult::default()
        .with_step(store.step())
        .with_errors(store.errors().clone())
        .with_draft(store.draft().clone());
    if store.is_degraded() {
        result.add_message(degraded_notice());
    }
    result
}
