use crate::model::Step;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown field: {0}")]
    InvalidField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Submit is only available from the review step (currently at {0})")]
    SubmitUnavailable(Step),
}

pub type Result<T> = std::result::Result<T, IntakeError>;

/// Failures on the optional remote delivery path.
///
/// These never leave the export service; they are downgraded to a
/// [`crate::export::SkipReason`] once local delivery has happened.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("credential request was declined")]
    Declined,

    #[error("credential request failed: {0}")]
    Credential(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote store answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Response(String),
}
