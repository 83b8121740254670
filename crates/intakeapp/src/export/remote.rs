//! Remote delivery: short-lived credentials and the upload call.

use super::artifact::{Artifact, XLSX_MIME};
use crate::error::RemoteError;
use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::io::IsTerminal;
use uuid::Uuid;

/// Write access to files this app creates, nothing else.
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

pub const DEFAULT_UPLOAD_ENDPOINT: &str =
    "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";

pub const ACCESS_TOKEN_ENV: &str = "INTAKE_ACCESS_TOKEN";

/// A bearer token good for one export attempt.
///
/// Deliberately not `Serialize`, not `Clone`: it is acquired, used, and dropped.
pub struct ExternalCredential {
    token: String,
    scope: String,
    expires_at: Option<DateTime<Utc>>,
}

impl ExternalCredential {
    pub fn bearer(token: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            scope: scope.into(),
            expires_at: None,
        }
    }

    pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl fmt::Debug for ExternalCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalCredential")
            .field("token", &"<redacted>")
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Source of credentials. May ask the user, may be declined, may never answer;
/// the export service bounds every call with a timeout.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn acquire(&self, scope: &str) -> Result<ExternalCredential, RemoteError>;

    fn name(&self) -> &'static str;
}

/// Reads a pre-issued token from the environment. No token means declined.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(ACCESS_TOKEN_ENV)
    }
}

#[async_trait]
impl CredentialProvider for EnvToken {
    async fn acquire(&self, scope: &str) -> Result<ExternalCredential, RemoteError> {
        match std::env::var(&self.var) {
            Ok(token) if !token.trim().is_empty() => {
                Ok(ExternalCredential::bearer(token.trim(), scope))
            }
            _ => Err(RemoteError::Declined),
        }
    }

    fn name(&self) -> &'static str {
        "env"
    }
}

/// Asks on the terminal for a token. Empty input, or no terminal, is a decline.
#[derive(Debug, Clone, Default)]
pub struct PromptToken;

#[async_trait]
impl CredentialProvider for PromptToken {
    async fn acquire(&self, scope: &str) -> Result<ExternalCredential, RemoteError> {
        if !std::io::stdin().is_terminal() {
            return Err(RemoteError::Declined);
        }
        let prompt = format!("Access token for {} (leave empty to skip upload)", scope);
        let answer = tokio::task::spawn_blocking(move || {
            dialoguer::Password::new()
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()
        })
        .await
        .map_err(|e| RemoteError::Credential(e.to_string()))?
        .map_err(|e| RemoteError::Credential(e.to_string()))?;

        if answer.trim().is_empty() {
            return Err(RemoteError::Declined);
        }
        Ok(ExternalCredential::bearer(answer.trim(), scope))
    }

    fn name(&self) -> &'static str {
        "prompt"
    }
}

/// Sends one artifact to the remote store and returns its remote id.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        artifact: &Artifact,
        credential: &ExternalCredential,
    ) -> Result<String, RemoteError>;
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

/// Drive-style `multipart/related` upload: a JSON metadata part followed by the
/// base64-encoded workbook.
#[derive(Debug, Clone)]
pub struct DriveUploader {
    client: Client,
    endpoint: String,
}

impl DriveUploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for DriveUploader {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_ENDPOINT)
    }
}

#[async_trait]
impl Uploader for DriveUploader {
    async fn upload(
        &self,
        artifact: &Artifact,
        credential: &ExternalCredential,
    ) -> Result<String, RemoteError> {
        if credential.is_expired(Utc::now()) {
            return Err(RemoteError::Credential("credential expired".to_string()));
        }

        let boundary = format!("intake-{}", Uuid::new_v4().simple());
        let body = multipart_body(&boundary, artifact);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential.token())
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| RemoteError::Response(e.to_string()))?;
        Ok(created.id)
    }
}

pub(crate) fn multipart_body(boundary: &str, artifact: &Artifact) -> String {
    let metadata = serde_json::json!({
        "name": artifact.file_name,
        "mimeType": XLSX_MIME,
    });
    let content = base64::engine::general_purpose::STANDARD.encode(&artifact.bytes);

    format!(
        "--{b}\r\n\
         Content-Type: application/json; charset=UTF-8\r\n\r\n\
         {metadata}\r\n\
         --{b}\r\n\
         Content-Type: {mime}\r\n\
         Content-Transfer-Encoding: base64\r\n\r\n\
         {content}\r\n\
         --{b}--\r\n",
        b = boundary,
        metadata = metadata,
        mime = XLSX_MIME,
        content = content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn artifact() -> Artifact {
        Artifact {
            file_name: "intake-test.xlsx".into(),
            bytes: b"PK\x03\x04sheet".to_vec(),
            rows: 1,
        }
    }

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body("XYZ", &artifact());
        assert!(body.starts_with("--XYZ\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n"));
        assert!(body.contains(r#""name":"intake-test.xlsx""#));
        assert!(body.contains("Content-Transfer-Encoding: base64\r\n\r\nUEsDBHNoZWV0\r\n"));
        assert!(body.ends_with("--XYZ--\r\n"));
    }

    #[test]
    fn test_credential_debug_redacts_token() {
        let cred = ExternalCredential::bearer("secret-token", DRIVE_FILE_SCOPE);
        let shown = format!("{:?}", cred);
        assert!(!shown.contains("secret-token"));
        assert!(shown.contains("redacted"));
    }

    #[test]
    fn test_credential_expiry() {
        let now = Utc::now();
        let cred = ExternalCredential::bearer("t", "s").expiring_at(now);
        assert!(cred.is_expired(now));
        assert!(!ExternalCredential::bearer("t", "s").is_expired(now));
    }

    #[tokio::test]
    async fn test_env_token_missing_is_declined() {
        let provider = EnvToken::new("INTAKE_TEST_TOKEN_THAT_IS_NEVER_SET");
        let err = provider.acquire(DRIVE_FILE_SCOPE).await.unwrap_err();
        assert!(matches!(err, RemoteError::Declined));
    }

    #[tokio::test]
    async fn test_upload_sends_bearer_and_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(header("authorization", "Bearer tok-1"))
            .and(header_regex("content-type", "^multipart/related; boundary=intake-"))
            .and(body_string_contains("Content-Transfer-Encoding: base64"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "file-123"})))
            .expect(1)
            .mount(&server)
            .await;

        let uploader = DriveUploader::new(format!("{}/upload", server.uri()));
        let cred = ExternalCredential::bearer("tok-1", DRIVE_FILE_SCOPE);
        let id = uploader.upload(&artifact(), &cred).await.unwrap();
        assert_eq!(id, "file-123");
    }

    #[tokio::test]
    async fn test_upload_non_2xx_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("insufficient scope"))
            .mount(&server)
            .await;

        let uploader = DriveUploader::new(server.uri());
        let cred = ExternalCredential::bearer("tok", DRIVE_FILE_SCOPE);
        match uploader.upload(&artifact(), &cred).await {
            Err(RemoteError::Status { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "insufficient scope");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_rejects_expired_credential_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let uploader = DriveUploader::new(server.uri());
        let cred = ExternalCredential::bearer("tok", DRIVE_FILE_SCOPE)
            .expiring_at(Utc::now() - chrono::Duration::minutes(1));
        assert!(matches!(
            uploader.upload(&artifact(), &cred).await,
            Err(RemoteError::Credential(_))
        ));
    }
}
