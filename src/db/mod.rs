use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::AppResult;

pub mod file_backend;
pub mod memory_backend;
pub mod migrations;
pub mod repositories;
pub mod sqlite_backend;

pub use file_backend::FileBackend;
pub use memory_backend::MemoryBackend;
pub use sqlite_backend::SqliteBackend;

/// Whole-document storage keyed by an opaque owner key.
///
/// Implementations only move bytes; interpreting the document is the
/// store's job.
pub trait DocumentBackend: Send + Sync {
    /// Returns `None` when no document exists for `owner`.
    fn read(&self, owner: &str) -> AppResult<Option<String>>;

    /// Replaces the whole document for `owner`.
    fn write(&self, owner: &str, document: &str) -> AppResult<()>;
}

impl<B: DocumentBackend + ?Sized> DocumentBackend for Box<B> {
    fn read(&self, owner: &str) -> AppResult<Option<String>> {
        (**self).read(owner)
    }

    fn write(&self, owner: &str, document: &str) -> AppResult<()> {
        (**self).write(owner, document)
    }
}

#[derive(Clone, Debug)]
pub struct DbPool {
    path: PathBuf,
}

impl DbPool {
    pub fn new<P: Into<PathBuf>>(path: P) -> AppResult<Self> {
        let path = path.into();
        info!(target: "app::db", db_path = %path.display(), "initializing database pool");
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let pool = Self { path };
        {
            pool.get_connection()?;
        }

        Ok(pool)
    }

    pub fn get_connection(&self) -> AppResult<Connection> {
        let mut conn = Connection::open(&self.path)?;
        configure_connection(&mut conn)?;
        migrations::run(&conn)?;
        debug!(target: "app::db", db_path = %self.path.display(), "database connection ready");
        Ok(conn)
    }

    pub fn with_connection<F, T>(&self, callback: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let conn = self.get_connection()?;
        callback(&conn)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn configure_connection(conn: &mut Connection) -> AppResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.pragma_update(None, "journal_mode", &"WAL")?;
    Ok(())
}
