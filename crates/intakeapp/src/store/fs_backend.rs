use super::backend::{DraftStorage, LedgerStorage};
use crate::error::{IntakeError, Result};
use crate::model::DraftSnapshot;
use crate::record::Record;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DRAFT_FILE: &str = "draft.json";
const LEDGER_FILE: &str = "ledger.json";

/// JSON files in a single data directory.
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn draft_path(&self) -> PathBuf {
        self.root.join(DRAFT_FILE)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.root.join(LEDGER_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(IntakeError::Io)?;
        }
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(IntakeError::Io)?;
        let value = serde_json::from_str(&content).map_err(IntakeError::Serialization)?;
        Ok(Some(value))
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(value).map_err(IntakeError::Serialization)?;

        // Atomic write, flushed to disk before it replaces the old file
        let tmp_file = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        write_synced(&tmp_file, content.as_bytes())?;
        fs::rename(&tmp_file, self.root.join(name)).map_err(IntakeError::Io)?;
        sync_dir(&self.root);
        Ok(())
    }
}

/// Write `bytes` to `path` and wait for the data to reach the disk.
pub(crate) fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).map_err(IntakeError::Io)?;
    file.write_all(bytes).map_err(IntakeError::Io)?;
    file.sync_all().map_err(IntakeError::Io)
}

/// Persist a rename. Not every platform can open a directory, so this is best-effort.
pub(crate) fn sync_dir(dir: &Path) {
    if let Ok(handle) = fs::File::open(dir) {
        let _ = handle.sync_all();
    }
}

impl DraftStorage for FsBackend {
    fn load_draft(&self) -> Result<Option<DraftSnapshot>> {
        self.read_json(&self.draft_path())
    }

    fn save_draft(&self, snapshot: &DraftSnapshot) -> Result<()> {
        self.write_json(DRAFT_FILE, snapshot)
    }

    fn delete_draft(&self) -> Result<()> {
        let path = self.draft_path();
        if path.exists() {
            fs::remove_file(path).map_err(IntakeError::Io)?;
        }
        Ok(())
    }
}

impl LedgerStorage for FsBackend {
    fn load_records(&self) -> Result<Vec<Record>> {
        Ok(self.read_json(&self.ledger_path())?.unwrap_or_default())
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        self.write_json(LEDGER_FILE, records)
    }

    fn ledger_location(&self) -> PathBuf {
        self.ledger_path()
    }
}
