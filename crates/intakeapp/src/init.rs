//! # Initialization
//!
//! Wires a ready-to-use [`IntakeApi`] from the environment.
//!
//! ## Data Directory
//!
//! Resolved in order:
//! 1. An explicit override (the CLI's `--data-dir`).
//! 2. The `INTAKE_DATA_DIR` environment variable, mostly used to isolate tests.
//! 3. The OS data directory from [`directories::ProjectDirs`].
//!
//! The directory holds `draft.json`, `ledger.json`, `intake.toml` and, unless
//! configured otherwise, the `exports/` folder.
//!
//! ## Remote Delivery
//!
//! `credential_source` in the config picks the [`CredentialProvider`]:
//! `env` reads `INTAKE_ACCESS_TOKEN`, `prompt` asks on the terminal, `none`
//! disables uploads entirely.
//!
//! [`CredentialProvider`]: crate::export::CredentialProvider

use crate::api::IntakeApi;
use crate::config::{CredentialSource, IntakeConfig};
use crate::error::{IntakeError, Result};
use crate::export::{DirSink, DriveUploader, EnvToken, ExportService, PromptToken};
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "INTAKE_DATA_DIR";

pub struct IntakeContext {
    pub api: IntakeApi<FsBackend, FsBackend>,
    pub config: IntakeConfig,
    pub data_dir: PathBuf,
}

/// Where intake keeps its files.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "intake", "intake")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| IntakeError::Config("could not determine a data directory".to_string()))
}

/// Build the export service the config asks for.
pub fn export_service(config: &IntakeConfig, data_dir: &Path) -> ExportService {
    let service = ExportService::new(DirSink::new(config.export_dir(data_dir)))
        .with_prefix(config.artifact_prefix.clone())
        .with_timeouts(config.credential_timeout(), config.upload_timeout());
    let uploader = DriveUploader::new(config.upload_endpoint.clone());

    match config.credential_source {
        CredentialSource::Env => service.with_remote(EnvToken::default(), uploader),
        CredentialSource::Prompt => service.with_remote(PromptToken, uploader),
        CredentialSource::None => service,
    }
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<IntakeContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = IntakeConfig::load(&data_dir)?;
    tracing::debug!(
        data_dir = %data_dir.display(),
        credential_source = %config.credential_source,
        "initializing"
    );

    let backend = FsBackend::new(data_dir.clone());
    let api = IntakeApi::new(
        backend.clone(),
        backend,
        export_service(&config, &data_dir),
    )
    .with_export_on_submit(config.export_on_submit);

    Ok(IntakeContext {
        api,
        config,
        data_dir,
    })
}
