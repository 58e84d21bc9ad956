//! Server configuration
//!
//! Sources, lowest precedence first:
//! - built-in defaults
//! - TOML file (`--config PATH`, else `~/.trivia/config.toml` when present)
//! - environment: `DATABASE_URL`, `TRIVIA_BIND`, `TRIVIA_PAGE_SIZE`,
//!   `TRIVIA_MAX_CONNECTIONS`
//!
//! Command-line flags are applied on top by the CLI.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;
use crate::models::DEFAULT_PAGE_SIZE;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriviaConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub api: ApiSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind to
    pub bind: SocketAddr,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// PostgreSQL connection string
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub questions_per_page: usize,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            questions_per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TriviaConfig {
    /// Default config file location: ~/.trivia/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".trivia").join("config.toml"))
    }

    /// Load from file (explicit path, or the default path if it exists),
    /// then apply process environment overrides and validate.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "config file loaded");
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.database.url = Some(url);
        }

        if let Some(value) = lookup("TRIVIA_BIND") {
            self.server.bind = parse_env("TRIVIA_BIND", value)?;
        }

        if let Some(value) = lookup("TRIVIA_PAGE_SIZE") {
            self.api.questions_per_page = parse_env("TRIVIA_PAGE_SIZE", value)?;
        }

        if let Some(value) = lookup("TRIVIA_MAX_CONNECTIONS") {
            self.database.max_connections = parse_env("TRIVIA_MAX_CONNECTIONS", value)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.questions_per_page == 0 {
            return Err(ConfigError::Invalid {
                reason: "api.questions_per_page must be at least 1".into(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                reason: "database.max_connections must be at least 1".into(),
            });
        }

        Ok(())
    }
}

fn parse_env<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::InvalidEnv {
        var,
        reason: e.to_string(),
        value,
    })
}
