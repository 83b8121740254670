//! # Configuration
//!
//! Intake configuration is managed by [`confique`], which handles layered loading
//! from a TOML file, environment variables, and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `INTAKE_EXPORT_DIR`, `INTAKE_CREDENTIAL_SOURCE`, etc.
//! 2. **Config file**: `<data_dir>/intake.toml`.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `export_on_submit` | `true` | Export the whole ledger after every submit |
//! | `export_dir` | `<data_dir>/exports` | Where local artifacts are written |
//! | `artifact_prefix` | `intake-submissions` | File name prefix for artifacts |
//! | `credential_source` | `env` | `env`, `prompt` or `none` (disables upload) |
//! | `upload_endpoint` | Drive multipart upload URL | Remote store endpoint |
//! | `credential_timeout_secs` | `120` | Give up waiting for a credential after this |
//! | `upload_timeout_secs` | `30` | Give up waiting for the upload after this |

use crate::error::{IntakeError, Result};
use crate::export::remote::DEFAULT_UPLOAD_ENDPOINT;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "intake.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CredentialSource {
    /// Pre-issued token in `INTAKE_ACCESS_TOKEN`.
    Env,
    /// Ask on the terminal.
    Prompt,
    /// Never upload.
    None,
}

impl TryFrom<String> for CredentialSource {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "env" => Ok(CredentialSource::Env),
            "prompt" => Ok(CredentialSource::Prompt),
            "none" => Ok(CredentialSource::None),
            other => Err(format!(
                "unknown credential source `{}` (expected env, prompt or none)",
                other
            )),
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CredentialSource::Env => "env",
            CredentialSource::Prompt => "prompt",
            CredentialSource::None => "none",
        };
        f.write_str(name)
    }
}

/// Configuration for intake, stored in `intake.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Export the whole ledger after every successful submit.
    #[config(default = true, env = "INTAKE_EXPORT_ON_SUBMIT")]
    pub export_on_submit: bool,

    /// Directory for local artifacts. When absent, `<data_dir>/exports`.
    #[config(env = "INTAKE_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    /// File name prefix for artifacts.
    #[config(default = "intake-submissions")]
    pub artifact_prefix: String,

    /// Where upload credentials come from: "env", "prompt" or "none".
    #[config(default = "env", env = "INTAKE_CREDENTIAL_SOURCE")]
    pub credential_source: CredentialSource,

    /// Remote store upload endpoint.
    #[config(
        default = "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart",
        env = "INTAKE_UPLOAD_ENDPOINT"
    )]
    pub upload_endpoint: String,

    #[config(default = 120)]
    pub credential_timeout_secs: u64,

    #[config(default = 30)]
    pub upload_timeout_secs: u64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            export_on_submit: true,
            export_dir: None,
            artifact_prefix: "intake-submissions".to_string(),
            credential_source: CredentialSource::Env,
            upload_endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            credential_timeout_secs: 120,
            upload_timeout_secs: 30,
        }
    }
}

impl IntakeConfig {
    /// Load from the environment and `<data_dir>/intake.toml`, falling back to defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        IntakeConfig::builder()
            .env()
            .file(data_dir.join(CONFIG_FILENAME))
            .load()
            .map_err(|e| IntakeError::Config(e.to_string()))
    }

    /// Export directory, resolved against the data directory.
    pub fn export_dir(&self, data_dir: &Path) -> PathBuf {
        match &self.export_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => data_dir.join(dir),
            None => data_dir.join("exports"),
        }
    }

    pub fn credential_timeout(&self) -> Duration {
        Duration::from_secs(self.credential_timeout_secs)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    /// Key/value pairs for display.
    pub fn entries(&self, data_dir: &Path) -> Vec<(&'static str, String)> {
        vec![
            ("export_on_submit", self.export_on_submit.to_string()),
            (
                "export_dir",
                self.export_dir(data_dir).display().to_string(),
            ),
            ("artifact_prefix", self.artifact_prefix.clone()),
            ("credential_source", self.credential_source.to_string()),
            ("upload_endpoint", self.upload_endpoint.clone()),
            (
                "credential_timeout_secs",
                self.credential_timeout_secs.to_string(),
            ),
            ("upload_timeout_secs", self.upload_timeout_secs.to_string()),
        ]
    }
}
