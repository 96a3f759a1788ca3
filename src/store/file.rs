use super::traits::{DismissalRecord, DismissalStore};
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const DISMISSAL_STORE_VERSION: u32 = 1;

fn default_store_version() -> u32 {
    DISMISSAL_STORE_VERSION
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default = "default_store_version")]
    version: u32,
    #[serde(default)]
    records: BTreeMap<String, DismissalRecord>,
}

/// Durable dismissal store backed by a single JSON document.
///
/// The document is read once at open. Each mutation rewrites the file
/// atomically and is only reflected in memory after the write lands.
pub struct JsonFileDismissalStore {
    path: PathBuf,
    records: Mutex<BTreeMap<String, DismissalRecord>>,
}

impl JsonFileDismissalStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let records = load_document(&path)?;
        tracing::debug!(path = %path.display(), records = records.len(), "dismissal store opened");
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, DismissalRecord>),
    ) -> Result<(), StorageError> {
        let mut records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        let mut next = records.clone();
        apply(&mut next);

        let document = StoreDocument {
            version: DISMISSAL_STORE_VERSION,
            records: next,
        };
        let serialized = serde_json::to_string_pretty(&document)?;
        write_atomic(&self.path, &serialized)?;

        *records = document.records;
        Ok(())
    }
}

impl DismissalStore for JsonFileDismissalStore {
    fn name(&self) -> &str {
        "json-file"
    }

    fn get(&self, key: &str) -> Result<Option<DismissalRecord>, StorageError> {
        let records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, record: &DismissalRecord) -> Result<(), StorageError> {
        self.mutate(|records| {
            records.insert(key.to_string(), record.clone());
        })
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let present = self
            .records
            .lock()
            .map_err(|_| StorageError::Poisoned)?
            .contains_key(key);
        if !present {
            return Ok(());
        }
        self.mutate(|records| {
            records.remove(key);
        })
    }
}

fn load_document(path: &Path) -> Result<BTreeMap<String, DismissalRecord>, StorageError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let raw = fs::read_to_string(path).map_err(io_error(path))?;
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let document: StoreDocument =
        serde_json::from_str(&raw).map_err(|err| StorageError::Corrupt {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    if document.version != DISMISSAL_STORE_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: document.version,
            expected: DISMISSAL_STORE_VERSION,
        });
    }

    Ok(document.records)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError {
    let path = path.to_path_buf();
    move |source| StorageError::Io { path, source }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(io_error(&temp_path))?;

    if let Err(rename_error) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::Io {
            path: path.to_path_buf(),
            source: rename_error,
        });
    }

    Ok(())
}
