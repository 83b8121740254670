//! # Export and Sync
//!
//! Turns a snapshot of the ledger into a spreadsheet and gets it out of the
//! process. The order of operations is the whole point of this module:
//!
//! 1. **Serialize** the records into a single-sheet xlsx workbook.
//! 2. **Deliver locally**, unconditionally and exactly once, through a
//!    [`LocalSink`]. This is the durability floor; its failure is the only error
//!    [`ExportService::export_and_sync`] returns.
//! 3. **Deliver remotely**, best effort: acquire an [`ExternalCredential`] under a
//!    timeout, then upload under a timeout. No retries.
//! 4. **Report**: [`RemoteDelivery::Delivered`] with the remote id, or
//!    [`RemoteDelivery::LocalOnly`] with the reason the upload did not happen.
//!
//! Remote failures are never errors here. By the time they can happen the local
//! copy already exists, so the caller always gets an [`ExportReport`].

pub mod artifact;
pub mod local;
pub mod remote;

pub use artifact::Artifact;
pub use local::{ArtifactHandle, DirSink, LocalSink};
pub use remote::{
    CredentialProvider, DriveUploader, EnvToken, ExternalCredential, PromptToken, Uploader,
    DRIVE_FILE_SCOPE,
};

use crate::error::{RemoteError, Result};
use crate::record::Record;
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::time::timeout;

/// Why the upload did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    Disabled,
    CredentialDeclined,
    CredentialTimedOut,
    CredentialFailed(String),
    UploadTimedOut,
    UploadFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "remote upload is disabled"),
            SkipReason::CredentialDeclined => write!(f, "remote access was declined"),
            SkipReason::CredentialTimedOut => write!(f, "remote access request timed out"),
            SkipReason::CredentialFailed(msg) => write!(f, "remote access failed: {}", msg),
            SkipReason::UploadTimedOut => write!(f, "upload timed out"),
            SkipReason::UploadFailed(msg) => write!(f, "upload failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoteDelivery {
    Delivered { remote_id: String },
    LocalOnly(SkipReason),
}

impl RemoteDelivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, RemoteDelivery::Delivered { .. })
    }

    pub fn remote_id(&self) -> Option<&str> {
        match self {
            RemoteDelivery::Delivered { remote_id } => Some(remote_id),
            RemoteDelivery::LocalOnly(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub local: ArtifactHandle,
    pub remote: RemoteDelivery,
}

impl ExportReport {
    /// Full success means both copies exist.
    pub fn is_full_success(&self) -> bool {
        self.remote.is_delivered()
    }
}

struct RemoteTarget {
    credentials: Box<dyn CredentialProvider>,
    uploader: Box<dyn Uploader>,
}

pub struct ExportService {
    prefix: String,
    local: Box<dyn LocalSink>,
    remote: Option<RemoteTarget>,
    credential_timeout: Duration,
    upload_timeout: Duration,
}

impl ExportService {
    pub const DEFAULT_CREDENTIAL_TIMEOUT: Duration = Duration::from_secs(120);
    pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

    /// Local delivery only, until [`ExportService::with_remote`] is called.
    pub fn new(local: impl LocalSink + 'static) -> Self {
        Self {
            prefix: "intake-submissions".to_string(),
            local: Box::new(local),
            remote: None,
            credential_timeout: Self::DEFAULT_CREDENTIAL_TIMEOUT,
            upload_timeout: Self::DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    pub fn with_remote(
        mut self,
        credentials: impl CredentialProvider + 'static,
        uploader: impl Uploader + 'static,
    ) -> Self {
        self.remote = Some(RemoteTarget {
            credentials: Box::new(credentials),
            uploader: Box::new(uploader),
        });
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_timeouts(mut self, credential: Duration, upload: Duration) -> Self {
        self.credential_timeout = credential;
        self.upload_timeout = upload;
        self
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn export_and_sync(&self, records: &[Record]) -> Result<ExportReport> {
        let artifact = artifact::build(records, &self.prefix, Utc::now())?;

        let local = self.local.deliver(&artifact)?;
        tracing::info!(path = %local.path.display(), rows = local.rows, "artifact saved locally");

        let remote = self.deliver_remote(&artifact).await;
        match &remote {
            RemoteDelivery::Delivered { remote_id } => {
                tracing::info!(remote_id = %remote_id, "artifact uploaded");
            }
            RemoteDelivery::LocalOnly(SkipReason::Disabled) => {
                tracing::debug!("remote upload disabled");
            }
            RemoteDelivery::LocalOnly(reason) => {
                tracing::warn!(%reason, "artifact kept locally only");
            }
        }

        Ok(ExportReport { local, remote })
    }

    async fn deliver_remote(&self, artifact: &Artifact) -> RemoteDelivery {
        let Some(target) = &self.remote else {
            return RemoteDelivery::LocalOnly(SkipReason::Disabled);
        };

        tracing::debug!(provider = target.credentials.name(), "requesting credential");
        let credential = match timeout(
            self.credential_timeout,
            target.credentials.acquire(DRIVE_FILE_SCOPE),
        )
        .await
        {
            Err(_) => return RemoteDelivery::LocalOnly(SkipReason::CredentialTimedOut),
            Ok(Err(RemoteError::Declined)) => {
                return RemoteDelivery::LocalOnly(SkipReason::CredentialDeclined)
            }
            Ok(Err(e)) => return RemoteDelivery::LocalOnly(SkipReason::CredentialFailed(e.to_string())),
            Ok(Ok(credential)) => credential,
        };

        match timeout(
            self.upload_timeout,
            target.uploader.upload(artifact, &credential),
        )
        .await
        {
            Err(_) => RemoteDelivery::LocalOnly(SkipReason::UploadTimedOut),
            Ok(Err(e)) => RemoteDelivery::LocalOnly(SkipReason::UploadFailed(e.to_string())),
            Ok(Ok(remote_id)) => RemoteDelivery::Delivered { remote_id },
        }
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Scripted credential behaviour.
    #[derive(Clone, Copy, Debug)]
    pub enum Grant {
        Token,
        Decline,
        Fail,
        Hang,
    }

    pub struct FakeCredentials {
        pub grant: Grant,
        pub calls: Arc<AtomicUsize>,
    }

    impl FakeCredentials {
        pub fn new(grant: Grant) -> Self {
            Self {
                grant,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait::async_trait]
    impl CredentialProvider for FakeCredentials {
        async fn acquire(&self, scope: &str) -> std::result::Result<ExternalCredential, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.grant {
                Grant::Token => Ok(ExternalCredential::bearer("fake-token", scope)),
                Grant::Decline => Err(RemoteError::Declined),
                Grant::Fail => Err(RemoteError::Credential("consent screen crashed".into())),
                Grant::Hang => std::future::pending().await,
            }
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    /// Records uploads; fails when `fail` is set.
    #[derive(Default)]
    pub struct FakeUploader {
        pub fail: bool,
        pub uploads: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Uploader for FakeUploader {
        async fn upload(
            &self,
            artifact: &Artifact,
            credential: &ExternalCredential,
        ) -> std::result::Result<String, RemoteError> {
            assert_eq!(credential.token(), "fake-token");
            if self.fail {
                return Err(RemoteError::Status {
                    status: 500,
                    body: "backend error".into(),
                });
            }
            let mut uploads = self.uploads.lock().expect("uploads lock");
            uploads.push(artifact.file_name.clone());
            Ok(format!("remote-{}", uploads.len()))
        }
    }
}
