use crate::commands::CmdResult;
use crate::model::{FieldPath, Step};
use crate::store::backend::DraftStorage;
use crate::store::DraftStore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldEntry {
    pub path: String,
    pub step: Step,
    pub value: String,
    /// Allowed values for enumerated leaves, empty for free text.
    pub choices: Vec<&'static str>,
}

/// Every leaf the draft currently has, in wizard order.
pub fn run<S: DraftStorage>(store: &DraftStore<S>) -> CmdResult {
    let draft = store.draft();
    let fields = FieldPath::all(draft.work.len())
        .into_iter()
        .map(|path| FieldEntry {
            path: path.to_string(),
            step: path.step(),
            value: draft.get(&path).unwrap_or_default(),
            choices: path.choices().map(|c| c.to_vec()).unwrap_or_default(),
        })
        .collect();

    let mut result = CmdResult::default().with_step(store.step());
    result.fields = fields;
    result
}
