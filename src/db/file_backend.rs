use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use tracing::debug;

use super::DocumentBackend;
use crate::error::AppResult;

const DOCUMENT_EXTENSION: &str = "json";

/// One JSON file per owner under `root`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new<P: Into<PathBuf>>(root: P) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Owner keys are opaque, so they are encoded rather than used as paths.
    pub fn document_path(&self, owner: &str) -> PathBuf {
        let encoded = URL_SAFE_NO_PAD.encode(owner.as_bytes());
        self.root.join(format!("{encoded}.{DOCUMENT_EXTENSION}"))
    }
}

impl DocumentBackend for FileBackend {
    fn read(&self, owner: &str) -> AppResult<Option<String>> {
        let path = self.document_path(owner);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(target: "app::db", path = %path.display(), "no document on disk");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, owner: &str, document: &str) -> AppResult<()> {
        let path = self.document_path(owner);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension(format!("{DOCUMENT_EXTENSION}.tmp"));
        fs::write(&tmp_path, document)?;
        fs::rename(&tmp_path, &path)?;
        debug!(
            target: "app::db",
            path = %path.display(),
            bytes = document.len(),
            "document written"
        );
        Ok(())
    }
}
