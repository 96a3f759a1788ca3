use super::traits::{DismissalRecord, DismissalStore};
use crate::error::StorageError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local dismissal store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryDismissalStore {
    records: Mutex<HashMap<String, DismissalRecord>>,
}

impl MemoryDismissalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DismissalStore for MemoryDismissalStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<DismissalRecord>, StorageError> {
        let records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, record: &DismissalRecord) -> Result<(), StorageError> {
        let mut records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        records.insert(key.to_string(), record.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        records.remove(key);
        Ok(())
    }
}
