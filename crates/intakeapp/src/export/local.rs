use super::artifact::Artifact;
use crate::error::{IntakeError, Result};
use crate::store::fs_backend::{sync_dir, write_synced};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Where the artifact landed on the user's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactHandle {
    pub path: PathBuf,
    pub file_name: String,
    pub rows: usize,
}

/// The guaranteed delivery channel. Called exactly once per export.
pub trait LocalSink {
    fn deliver(&self, artifact: &Artifact) -> Result<ArtifactHandle>;
}

/// Writes artifacts into a directory.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl LocalSink for DirSink {
    fn deliver(&self, artifact: &Artifact) -> Result<ArtifactHandle> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(IntakeError::Io)?;
        }
        let target = self.dir.join(&artifact.file_name);

        // Atomic write
        let tmp = self.dir.join(format!(".artifact-{}.tmp", Uuid::new_v4()));
        write_synced(&tmp, &artifact.bytes)?;
        fs::rename(&tmp, &target).map_err(IntakeError::Io)?;
        sync_dir(&self.dir);

        Ok(ArtifactHandle {
            path: target,
            file_name: artifact.file_name.clone(),
            rows: artifact.rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_sink_writes_file_and_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirSink::new(dir.path().join("exports"));
        let artifact = Artifact {
            file_name: "out.xlsx".into(),
            bytes: b"PK\x03\x04data".to_vec(),
            rows: 3,
        };

        let handle = sink.deliver(&artifact).unwrap();
        assert_eq!(handle.rows, 3);
        assert_eq!(fs::read(&handle.path).unwrap(), artifact.bytes);

        for entry in fs::read_dir(sink.dir()).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(!name.to_string_lossy().ends_with(".tmp"));
        }
    }
}
