//! # Intake Architecture
//!
//! Intake is a step-by-step assessment questionnaire: a wizard collects answers
//! into a draft, validates each page before moving on, and on submit turns the
//! draft into a flat record, appends it to a ledger, and exports the ledger as a
//! spreadsheet (always to disk, and to a remote store when a credential is
//! available).
//!
//! ## Layering
//!
//! ```text
//! UI (CLI crate)  ->  api.rs  ->  commands/*.rs  ->  store/ + export/
//! ```
//!
//! - [`api`]: Facade, parses inputs and dispatches.
//! - [`commands`]: Business logic, returns [`commands::CmdResult`].
//! - [`store`]: Draft and ledger persistence behind the
//!   [`DraftStorage`](store::backend::DraftStorage) and
//!   [`LedgerStorage`](store::backend::LedgerStorage) ports.
//! - [`export`]: Spreadsheet artifact, local delivery and remote upload.
//!
//! Pure pieces sit underneath: [`model`] (the draft and steps), [`validation`]
//! (per-step field checks) and [`record`] (flattening a draft).
//!
//! The library never prints. Anything user-facing is returned as data and
//! rendered by the UI crate.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod init;
pub mod model;
pub mod record;
pub mod store;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
pub mod validation;
