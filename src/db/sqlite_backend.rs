use std::path::PathBuf;

use tracing::debug;

use super::repositories::document_repository::DocumentRepository;
use super::{DbPool, DocumentBackend};
use crate::error::AppResult;

/// Documents stored as rows of the `workout_documents` table.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: DbPool,
}

impl SqliteBackend {
    pub fn open<P: Into<PathBuf>>(path: P) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::new(path)?,
        })
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Drops the row entirely instead of storing an empty document.
    pub fn purge(&self, owner: &str) -> AppResult<()> {
        self.pool
            .with_connection(|conn| DocumentRepository::delete(conn, owner))
    }
}

impl DocumentBackend for SqliteBackend {
    fn read(&self, owner: &str) -> AppResult<Option<String>> {
        let row = self
            .pool
            .with_connection(|conn| DocumentRepository::get(conn, owner))?;
        Ok(row.map(|row| row.document))
    }

    fn write(&self, owner: &str, document: &str) -> AppResult<()> {
        self.pool
            .with_connection(|conn| DocumentRepository::upsert(conn, owner, document))?;
        debug!(target: "app::db", bytes = document.len(), "document row upserted");
        Ok(())
    }
}
