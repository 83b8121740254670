use super::backend::LedgerStorage;
use crate::error::Result;
use crate::record::Record;

/// Append-only, ordered collection of submitted records.
///
/// The full sequence is kept in memory and written through on every append. A
/// ledger that failed to load is never written back: saving would replace the
/// durable history with the partial in-memory one.
pub struct Ledger<L: LedgerStorage> {
    storage: L,
    records: Vec<Record>,
    degraded: bool,
}

impl<L: LedgerStorage> Ledger<L> {
    pub fn open(storage: L) -> Self {
        let (records, degraded) = match storage.load_records() {
            Ok(records) => (records, false),
            Err(e) => {
                tracing::warn!(error = %e, "could not load ledger, new records stay in memory");
                (Vec::new(), true)
            }
        };
        Self {
            storage,
            records,
            degraded,
        }
    }

    /// Add `record` at the end. Returns whether it reached durable storage.
    pub fn append(&mut self, record: Record) -> bool {
        self.records.push(record);
        if self.degraded {
            return false;
        }
        match self.storage.save_records(&self.records) {
            Ok(()) => {
                tracing::debug!(len = self.records.len(), "ledger appended");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "ledger write failed, continuing in memory");
                self.degraded = true;
                false
            }
        }
    }

    /// Ordered snapshot.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn storage(&self) -> &L {
        &self.storage
    }

    /// Administrative bulk clear. Unlike append, a failure here is reported.
    pub fn clear(&mut self) -> Result<usize> {
        self.storage.save_records(&[])?;
        let removed = self.records.len();
        self.records.clear();
        self.degraded = false;
        tracing::info!(removed, "ledger cleared");
        Ok(removed)
    }
}
