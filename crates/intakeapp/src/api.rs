//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every intake operation, whatever UI drives it.
//!
//! The facade:
//! - **Dispatches** to the matching function in `commands/*.rs`
//! - **Normalizes inputs**, e.g. parsing `"work.0.title"` into a [`FieldPath`]
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no I/O of its own and no formatting.
//!
//! ## Generic Over Storage
//!
//! `IntakeApi<S: DraftStorage, L: LedgerStorage>` takes the two persistence ports
//! separately:
//! - Production: `IntakeApi<FsBackend, FsBackend>`
//! - Testing: `IntakeApi<MemBackend, MemBackend>`

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::export::ExportService;
use crate::model::FieldPath;
use crate::store::backend::{DraftStorage, LedgerStorage};
use crate::store::{DraftStore, Ledger};

pub struct IntakeApi<S: DraftStorage, L: LedgerStorage> {
    drafts: DraftStore<S>,
    ledger: Ledger<L>,
    export: ExportService,
    export_on_submit: bool,
}

impl<S: DraftStorage, L: LedgerStorage> IntakeApi<S, L> {
    pub fn new(drafts: S, ledger: L, export: ExportService) -> Self {
        Self {
            drafts: DraftStore::open(drafts),
            ledger: Ledger::open(ledger),
            export,
            export_on_submit: true,
        }
    }

    /// Whether a successful submit also exports the ledger.
    pub fn with_export_on_submit(mut self, enabled: bool) -> Self {
        self.export_on_submit = enabled;
        self
    }

    pub fn status(&self) -> CmdResult {
        commands::status::run(&self.drafts)
    }

    pub fn fields(&self) -> CmdResult {
        commands::fields::run(&self.drafts)
    }

    pub fn update(&mut self, path: &str, value: &str) -> Result<CmdResult> {
        let path: FieldPath = path.parse()?;
        commands::update::run(&mut self.drafts, &path, value)
    }

    pub fn advance(&mut self) -> CmdResult {
        commands::advance::run(&mut self.drafts)
    }

    pub fn retreat(&mut self) -> CmdResult {
        commands::retreat::run(&mut self.drafts)
    }

    pub async fn submit(&mut self, current_user: Option<&str>) -> Result<CmdResult> {
        let export = self.export_on_submit.then_some(&self.export);
        commands::submit::run(&mut self.drafts, &mut self.ledger, export, current_user).await
    }

    pub async fn export(&self) -> Result<CmdResult> {
        commands::export::run(&self.ledger, &self.export).await
    }

    pub fn list_records(&self) -> CmdResult {
        commands::ledger::list(&self.ledger)
    }

    pub fn clear_records(&mut self) -> Result<CmdResult> {
        commands::ledger::clear(&mut self.ledger)
    }

    pub fn drafts(&self) -> &DraftStore<S> {
        &self.drafts
    }

    pub fn ledger(&self) -> &Ledger<L> {
        &self.ledger
    }

    pub fn export_service(&self) -> &ExportService {
        &self.export
    }
}
