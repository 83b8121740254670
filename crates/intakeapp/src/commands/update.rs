use crate::commands::{degraded_notice, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::FieldPath;
use crate::store::backend::DraftStorage;
use crate::store::DraftStore;

pub fn run<S: DraftStorage>(
    store: &mut DraftStore<S>,
    path: &FieldPath,
    value: &str,
) -> Result<CmdResult> {
    store.update(path, value)?;

    let mut result = CmdResult::default()
        .with_step(store.step())
        .with_errors(store.errors().clone());
    if value.is_empty() {
        result.add_message(CmdMessage::success(format!("Cleared {}", path)));
    } else {
        result.add_message(CmdMessage::success(format!("Set {}", path)));
    }
    if path.step() != store.step() {
        result.add_message(CmdMessage::info(format!(
            "{} belongs to the {} step",
            path,
            path.step().title()
        )));
    }
    if store.is_degraded() {
        result.add_message(degraded_notice());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntakeError;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn test_update_sets_value_and_reports() {
        let mut store = DraftStore::open(MemBackend::new());
        let path: FieldPath = "contact.email".parse().unwrap();
        let result = run(&mut store, &path, "a@b.co").unwrap();
        assert_eq!(store.draft().contact.email, "a@b.co");
        assert_eq!(result.messages[0].content, "Set contact.email");
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn test_update_other_step_notes_it() {
        let mut store = DraftStore::open(MemBackend::new());
        let path: FieldPath = "interest.notes".parse().unwrap();
        let result = run(&mut store, &path, "hello").unwrap();
        assert!(result.messages[1].content.contains("Interest"));
    }

    #[test]
    fn test_update_invalid_choice_is_error() {
        let mut store = DraftStore::open(MemBackend::new());
        let path: FieldPath = "basics.marital".parse().unwrap();
        assert!(matches!(
            run(&mut store, &path, "Complicated"),
            Err(IntakeError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_update_warns_when_degraded() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut store = DraftStore::open(backend);
        let path: FieldPath = "contact.phone".parse().unwrap();
        let result = run(&mut store, &path, "1").unwrap();
        assert!(result.has_warnings());
    }
}
