//! # Command Layer
//!
//! The wizard's business logic. Each operation lives in its own submodule as plain
//! functions over the [`DraftStore`](crate::store::DraftStore),
//! [`Ledger`](crate::store::Ledger) and [`ExportService`](crate::export::ExportService).
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings. It carries the step the wizard is
//! on afterwards, the field report of the last validation, records, export
//! outcomes, and leveled messages. The UI decides how to render them.
//!
//! Validation failures are ordinary results (`CmdResult::errors` non-passing),
//! never `Err`. `Err` is reserved for usage errors and hard I/O failures.
//!
//! ## Command Modules
//!
//! - [`update`]: Write one draft leaf
//! - [`advance`]: Validate and move forward
//! - [`retreat`]: Move back
//! - [`status`]: Report where the wizard stands
//! - [`fields`]: List every addressable leaf with its value and choices
//! - [`submit`]: Commit the draft to the ledger and export
//! - [`export`]: Administrative export of the whole ledger
//! - [`ledger`]: List and bulk-clear submitted records

use crate::export::ExportReport;
use crate::model::{Draft, Step};
use crate::record::Record;
use crate::validation::FieldErrors;
use serde::Serialize;

pub mod advance;
pub mod export;
pub mod fields;
pub mod ledger;
pub mod retreat;
pub mod status;
pub mod submit;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Step the wizard is on after the command.
    pub step: Option<Step>,
    /// Report from the last validation of `step`.
    pub errors: FieldErrors,
    pub draft: Option<Draft>,
    pub records: Vec<Record>,
    /// The record a submit appended.
    pub submitted: Option<Record>,
    pub export: Option<ExportReport>,
    pub fields: Vec<fields::FieldEntry>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = Some(draft);
        self
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    /// True unless the last validation reported a field.
    pub fn passed(&self) -> bool {
        self.errors.passes()
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}

/// Shared "progress is not being saved" notice.
pub(crate) fn degraded_notice() -> CmdMessage {
    CmdMessage::warning("Progress could not be saved; answers are kept for this session only.")
}
