//! Connection and loader configuration.
//!
//! Values are resolved once at startup: built-in defaults, then an optional
//! TOML file, then overrides (environment variables and command-line flags,
//! both collected by the CLI).

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MovieGraphError, MovieGraphResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MOVIEGRAPH_CONFIG";

/// Configuration for connecting to Neo4j and writing the dataset.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Bolt address, e.g. `bolt://localhost:7687` or `localhost:7687`.
    pub address: String,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
    pub fetch_size: usize,
    /// Rows per `UNWIND` write statement.
    pub batch_size: usize,
    pub connect_timeout_secs: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            address: "bolt://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: "neo4j".to_string(),
            database: "neo4j".to_string(),
            max_connections: 4,
            fetch_size: 200,
            batch_size: 500,
            connect_timeout_secs: 10,
        }
    }
}

impl fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("fetch_size", &self.fetch_size)
            .field("batch_size", &self.batch_size)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Values supplied from outside the config file. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub address: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub batch_size: Option<usize>,
}

impl GraphConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str, origin: &Path) -> MovieGraphResult<Self> {
        toml::from_str(s).map_err(|source| MovieGraphError::TomlParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> MovieGraphResult<Self> {
        if !path.exists() {
            return Err(MovieGraphError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, path)
    }

    /// Resolve the config file (explicit path, `$MOVIEGRAPH_CONFIG`, then the
    /// platform config directory) and apply overrides on top.
    ///
    /// An explicitly named file must exist; the platform default is optional.
    pub fn load(explicit: Option<&Path>, overrides: ConfigOverrides) -> MovieGraphResult<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);

        let base = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                debug!(path = %path.display(), "Loading config file");
                Self::from_file(&path)?
            }
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => {
                    debug!(path = %path.display(), "Loading default config file");
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };

        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides, keeping current values where none is given.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(address) = overrides.address {
            self.address = address;
        }
        if let Some(username) = overrides.username {
            self.username = username;
        }
        if let Some(password) = overrides.password {
            self.password = password;
        }
        if let Some(database) = overrides.database {
            self.database = database;
        }
        if let Some(batch_size) = overrides.batch_size {
            self.batch_size = batch_size;
        }
        self
    }

    pub fn validate(&self) -> MovieGraphResult<()> {
        if self.address.trim().is_empty() {
            return Err(MovieGraphError::config("address must not be empty"));
        }
        if self.batch_size == 0 {
            return Err(MovieGraphError::config("batch_size must be at least 1"));
        }
        if self.max_connections == 0 {
            return Err(MovieGraphError::config("max_connections must be at least 1"));
        }
        Ok(())
    }
}

/// `<config dir>/moviegraph/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("moviegraph").join("config.toml"))
}
