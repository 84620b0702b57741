use std::collections::HashMap;
use std::sync::RwLock;

use super::DocumentBackend;
use crate::error::{AppError, AppResult};

/// In-process backend, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw document, bypassing the store.
    pub fn insert_raw(&self, owner: &str, document: impl Into<String>) -> AppResult<()> {
        self.write(owner, &document.into())
    }
}

impl DocumentBackend for MemoryBackend {
    fn read(&self, owner: &str) -> AppResult<Option<String>> {
        let guard = self
            .documents
            .read()
            .map_err(|_| AppError::storage("memory backend lock poisoned"))?;
        Ok(guard.get(owner).cloned())
    }

    fn write(&self, owner: &str, document: &str) -> AppResult<()> {
        let mut guard = self
            .documents
            .write()
            .map_err(|_| AppError::storage("memory backend lock poisoned"))?;
        guard.insert(owner.to_string(), document.to_string());
        Ok(())
    }
}
