use crate::error::Result;
use crate::model::DraftSnapshot;
use crate::record::Record;
use std::path::PathBuf;

/// Durable slot for the in-progress draft.
///
/// Implementations handle the "how" (filesystem vs memory); [`super::DraftStore`]
/// handles the "what" (mutation, degradation, reset).
pub trait DraftStorage {
    /// Load the saved draft. `Ok(None)` when nothing has been saved yet.
    fn load_draft(&self) -> Result<Option<DraftSnapshot>>;

    /// Replace the saved draft.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_draft(&self, snapshot: &DraftSnapshot) -> Result<()>;

    /// Remove the saved draft. Removing a missing draft is not an error.
    fn delete_draft(&self) -> Result<()>;
}

/// Durable slot for the submitted records, in submission order.
pub trait LedgerStorage {
    /// Load every record. An absent slot is an empty ledger.
    fn load_records(&self) -> Result<Vec<Record>>;

    /// Replace the stored sequence.
    /// MUST be atomic: after a successful return the next load sees exactly `records`.
    /// Durable backends also flush to disk before returning, so the write outlives a crash.
    fn save_records(&self, records: &[Record]) -> Result<()>;

    /// Where the ledger lives, for display.
    fn ledger_location(&self) -> PathBuf;
}
