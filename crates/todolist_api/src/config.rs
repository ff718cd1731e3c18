//! Server configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `TODOLIST_BIND` | `127.0.0.1:5000` |
//! | `TODOLIST_DB_PATH` | `todolist.sqlite3` (`:memory:` for an in-memory DB) |
//! | `TODOLIST_LOG_LEVEL` | `todolist_core::default_log_level()` |
//! | `TODOLIST_LOG_DIR` | `<cwd>/logs` |

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const ENV_BIND: &str = "TODOLIST_BIND";
pub const ENV_DB_PATH: &str = "TODOLIST_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TODOLIST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TODOLIST_LOG_DIR";

const DEFAULT_BIND: &str = "127.0.0.1:5000";
const DEFAULT_DB_FILE: &str = "todolist.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "logs";
const IN_MEMORY_DB: &str = ":memory:";

/// Where the todo store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db: DbLocation,
    pub log_level: String,
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBind { value: String, reason: String },
    Empty(&'static str),
    WorkingDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBind { value, reason } => {
                write!(f, "invalid {ENV_BIND} `{value}`: {reason}")
            }
            Self::Empty(key) => write!(f, "{key} is set but empty"),
            Self::WorkingDir(err) => write!(f, "cannot resolve working directory: {err}"),
        }
    }
}

impl Error for ConfigError {}

impl ServerConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|err| ConfigError::WorkingDir(err.to_string()))?;
        Self::from_lookup(&cwd, |key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`; relative paths resolve against
    /// `cwd`.
    pub fn from_lookup(
        cwd: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind_text = non_empty(ENV_BIND, lookup(ENV_BIND))?
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_text
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidBind {
                value: bind_text.clone(),
                reason: err.to_string(),
            })?;

        let db = match non_empty(ENV_DB_PATH, lookup(ENV_DB_PATH))? {
            Some(value) if value == IN_MEMORY_DB => DbLocation::InMemory,
            Some(value) => DbLocation::File(cwd.join(value)),
            None => DbLocation::File(cwd.join(DEFAULT_DB_FILE)),
        };

        let log_level = non_empty(ENV_LOG_LEVEL, lookup(ENV_LOG_LEVEL))?
            .unwrap_or_else(|| todolist_core::default_log_level().to_string());

        let log_dir = non_empty(ENV_LOG_DIR, lookup(ENV_LOG_DIR))?
            .map(|value| cwd.join(value))
            .unwrap_or_else(|| cwd.join(DEFAULT_LOG_DIR_NAME));

        Ok(Self {
            bind_addr,
            db,
            log_level,
            log_dir,
        })
    }
}

fn non_empty(key: &'static str, value: Option<String>) -> Result<Option<String>, ConfigError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(key)),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}
