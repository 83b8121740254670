use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::LedgerStorage;
use crate::store::Ledger;

pub fn list<L: LedgerStorage>(ledger: &Ledger<L>) -> CmdResult {
    let mut result = CmdResult::default().with_records(ledger.all().to_vec());
    if ledger.is_empty() {
        result.add_message(CmdMessage::info("No submissions yet."));
    }
    if ledger.is_degraded() {
        result.add_message(CmdMessage::warning(format!(
            "Ledger at {} could not be read; showing this session only.",
            ledger.storage().ledger_location().display()
        )));
    }
    result
}

/// Remove every record. Errors are propagated; nothing is half-cleared.
pub fn clear<L: LedgerStorage>(ledger: &mut Ledger<L>) -> Result<CmdResult> {
    let removed = ledger.clear()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cleared {} record{}",
        removed,
        if removed == 1 { "" } else { "s" }
    )));
    Ok(result)
}
