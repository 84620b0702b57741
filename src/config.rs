use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::db::{DocumentBackend, FileBackend, MemoryBackend, SqliteBackend};
use crate::error::{AppError, AppResult};
use crate::services::workout_store::WorkoutStore;

pub const ENV_DATA_DIR: &str = "LIFTLOG_DATA_DIR";
pub const ENV_BACKEND: &str = "LIFTLOG_BACKEND";
pub const ENV_LOG_DIR: &str = "LIFTLOG_LOG_DIR";

const DEFAULT_DATA_DIR: &str = "liftlog-data";
const DEFAULT_LOG_FILE: &str = "liftlog.log";
const SQLITE_FILE_NAME: &str = "liftlog.sqlite";

pub type DynStore = WorkoutStore<Box<dyn DocumentBackend>>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    File,
    Sqlite,
    Memory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::File => "file",
            BackendKind::Sqlite => "sqlite",
            BackendKind::Memory => "memory",
        }
    }

    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "file" => Ok(BackendKind::File),
            "sqlite" => Ok(BackendKind::Sqlite),
            "memory" => Ok(BackendKind::Memory),
            other => Err(AppError::config(format!("unknown backend '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Directory for the rolling log file. Console only when unset.
    pub dir: Option<PathBuf>,
    pub file_name: String,
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    pub directives: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            file_name: DEFAULT_LOG_FILE.to_string(),
            directives: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub backend: BackendKind,
    pub log: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            backend: BackendKind::default(),
            log: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads the optional YAML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(path)?;
                debug!(target: "app::config", path = %path.display(), "reading config file");
                Self::from_yaml_str(&content)?
            }
            Some(path) => {
                debug!(target: "app::config", path = %path.display(), "config file missing, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        info!(
            target: "app::config",
            data_dir = %config.data_dir.display(),
            backend = config.backend.as_str(),
            "configuration loaded"
        );
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|err| AppError::config(format!("invalid config file: {err}")))
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|value| !value.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(ENV_BACKEND) {
            self.backend = BackendKind::parse(&backend)?;
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|value| !value.trim().is_empty()) {
            self.log.dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(SQLITE_FILE_NAME)
    }

    pub fn open_backend(&self) -> AppResult<Box<dyn DocumentBackend>> {
        let backend: Box<dyn DocumentBackend> = match self.backend {
            BackendKind::File => Box::new(FileBackend::new(&self.data_dir)?),
            BackendKind::Sqlite => Box::new(SqliteBackend::open(self.sqlite_path())?),
            BackendKind::Memory => Box::new(MemoryBackend::new()),
        };
        Ok(backend)
    }

    pub fn open_store(&self) -> AppResult<DynStore> {
        Ok(WorkoutStore::new(self.open_backend()?))
    }
}
