//! # Storage Layer
//!
//! Intake keeps two independent durable slots, each behind its own port so the
//! pipeline is storage-agnostic:
//!
//! 1. **Draft slot** ([`backend::DraftStorage`]): the in-progress answers and the
//!    step to resume on. Read at session start, written on every mutation,
//!    deleted after a successful submit.
//! 2. **Ledger slot** ([`backend::LedgerStorage`]): every submitted
//!    [`Record`](crate::record::Record), in submission order.
//!
//! [`DraftStore`] and [`Ledger`] sit on top of the ports and own the in-memory
//! state. Both degrade to memory-only operation when their slot fails instead of
//! halting the session.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production. JSON files, atomic tmp-then-rename writes
//!   synced to disk before the rename.
//! - [`mem_backend::MemBackend`]: For testing logic without filesystem I/O, with
//!   read/write failure simulation.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── intake.toml     # Configuration (optional)
//! ├── draft.json      # DraftSnapshot
//! ├── ledger.json     # [Record, ...]
//! └── exports/        # Spreadsheet artifacts (default export_dir)
//! ```

pub mod backend;
pub mod draft_store;
pub mod fs_backend;
pub mod ledger;
pub mod mem_backend;

pub use draft_store::DraftStore;
pub use ledger::Ledger;
