use crate::commands::submit::add_export_messages;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::ExportService;
use crate::store::backend::LedgerStorage;
use crate::store::Ledger;

/// Administrative export of the whole ledger, outside of any submission.
pub async fn run<L: LedgerStorage>(ledger: &Ledger<L>, service: &ExportService) -> Result<CmdResult> {
    let report = service.export_and_sync(ledger.all()).await?;

    let mut result = CmdResult::default();
    if ledger.is_empty() {
        result.add_message(CmdMessage::info("Ledger is empty; exported header row only."));
    }
    add_export_messages(&mut result, &report);
    result.export = Some(report);
    Ok(result)
}
