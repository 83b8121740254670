use super::backend::{DraftStorage, LedgerStorage};
use crate::error::{IntakeError, Result};
use crate::model::DraftSnapshot;
use crate::record::Record;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Default)]
struct Slots {
    draft: Option<DraftSnapshot>,
    records: Option<Vec<Record>>,
    simulate_write_error: bool,
    simulate_read_error: bool,
}

/// In-memory storage backend for testing.
///
/// Uses `Rc<RefCell<..>>` since intake is single-threaded. Clones share the same
/// slots, so a test can hand one clone to the API and keep another to inspect
/// what was "persisted" or to reopen a session as if the process restarted.
#[derive(Clone, Default)]
pub struct MemBackend {
    slots: Rc<RefCell<Slots>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing degraded persistence.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.slots.borrow_mut().simulate_write_error = simulate;
    }

    /// Enable read error simulation for testing degraded persistence.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.slots.borrow_mut().simulate_read_error = simulate;
    }

    /// Test helper: what the draft slot currently holds.
    pub fn stored_draft(&self) -> Option<DraftSnapshot> {
        self.slots.borrow().draft.clone()
    }

    /// Test helper: what the ledger slot currently holds.
    pub fn stored_records(&self) -> Vec<Record> {
        self.slots.borrow().records.clone().unwrap_or_default()
    }

    fn check_write(&self) -> Result<()> {
        if self.slots.borrow().simulate_write_error {
            return Err(IntakeError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<()> {
        if self.slots.borrow().simulate_read_error {
            return Err(IntakeError::Store("Simulated read error".to_string()));
        }
        Ok(())
    }
}

impl DraftStorage for MemBackend {
    fn load_draft(&self) -> Result<Option<DraftSnapshot>> {
        self.check_read()?;
        Ok(self.slots.borrow().draft.clone())
    }

    fn save_draft(&self, snapshot: &DraftSnapshot) -> Result<()> {
        self.check_write()?;
        self.slots.borrow_mut().draft = Some(snapshot.clone());
        Ok(())
    }

    fn delete_draft(&self) -> Result<()> {
        self.check_write()?;
        self.slots.borrow_mut().draft = None;
        Ok(())
    }
}

impl LedgerStorage for MemBackend {
    fn load_records(&self) -> Result<Vec<Record>> {
        self.check_read()?;
        Ok(self.stored_records())
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        self.check_write()?;
        self.slots.borrow_mut().records = Some(records.to_vec());
        Ok(())
    }

    fn ledger_location(&self) -> PathBuf {
        PathBuf::from("memory://ledger")
    }
}
