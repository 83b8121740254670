use crate::commands::{degraded_notice, CmdMessage, CmdResult};
use crate::error::{IntakeError, Result};
use crate::export::{ExportReport, ExportService, RemoteDelivery, SkipReason};
use crate::model::Step;
use crate::record::assemble;
use crate::store::backend::{DraftStorage, LedgerStorage};
use crate::store::{DraftStore, Ledger};
use crate::validation::validate;

/// Commit the draft: assemble a record, append it to the ledger, export the
/// ledger, then reset the wizard.
///
/// Only available from [`Step::Review`]. Once the record is appended the wizard is
/// reset whatever happens to the export; remote and local export problems are
/// reported as messages.
pub async fn run<S: DraftStorage, L: LedgerStorage>(
    store: &mut DraftStore<S>,
    ledger: &mut Ledger<L>,
    export: Option<&ExportService>,
    submitted_by: Option<&str>,
) -> Result<CmdResult> {
    let step = store.step();
    if step != Step::Review {
        return Err(IntakeError::SubmitUnavailable(step));
    }

    let report = validate(store.draft(), step);
    if !report.passes() {
        store.publish_errors(report);
        let mut result = CmdResult::default()
            .with_step(step)
            .with_errors(store.errors().clone());
        result.add_message(CmdMessage::warning("Review needs attention before submitting"));
        return Ok(result);
    }

    let record = assemble(store.draft(), submitted_by);
    let mut result = CmdResult::default();

    if ledger.append(record.clone()) {
        result.add_message(CmdMessage::success(format!(
            "Submitted {} ({} in ledger)",
            record.full_name(),
            ledger.len()
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Submitted {}, but the ledger could not be saved. This record and any later \
             submissions are kept in memory for this session only.",
            record.full_name()
        )));
    }
    result.submitted = Some(record);

    if let Some(service) = export {
        match service.export_and_sync(ledger.all()).await {
            Ok(report) => {
                add_export_messages(&mut result, &report);
                result.export = Some(report);
            }
            Err(e) => {
                tracing::error!(error = %e, "export after submit failed");
                result.add_message(CmdMessage::error(format!("Export failed: {}", e)));
            }
        }
    }

    store.reset();
    if store.is_degraded() {
        result.add_message(degraded_notice());
    }

    Ok(result
        .with_step(store.step())
        .with_errors(store.errors().clone()))
}

/// Messages describing one export: where the file went and what happened remotely.
pub(crate) fn add_export_messages(result: &mut CmdResult, report: &ExportReport) {
    result.add_message(CmdMessage::success(format!(
        "Saved {} ({} row{})",
        report.local.path.display(),
        report.local.rows,
        if report.local.rows == 1 { "" } else { "s" }
    )));
    match &report.remote {
        RemoteDelivery::Delivered { remote_id } => {
            result.add_message(CmdMessage::success(format!("Uploaded as {}", remote_id)));
        }
        RemoteDelivery::LocalOnly(SkipReason::Disabled) => {
            result.add_message(CmdMessage::info("Remote upload is off."));
        }
        RemoteDelivery::LocalOnly(reason) => {
            result.add_message(CmdMessage::warning(format!(
                "Not uploaded: {}. The local file is complete.",
                reason
            )));
        }
    }
}
