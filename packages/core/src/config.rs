//! Runtime server configuration
//!
//! ServerConfig is rebuilt from the environment on every launch:
//!
//! - `GRAPH_DB_PATH` - database file (default `~/.webmcp-graph/graph.db`)
//! - `GRAPH_SEED_DEMO` - seed the demo graph into an empty database (default true)
//!
//! Log filtering uses `RUST_LOG` and is handled by the binary.

use std::path::PathBuf;
use thiserror::Error;

pub const DB_PATH_VAR: &str = "GRAPH_DB_PATH";
pub const SEED_DEMO_VAR: &str = "GRAPH_SEED_DEMO";

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to get home directory; set GRAPH_DB_PATH")]
    HomeDirUnavailable,

    #[error("Invalid value for {var}: '{value}' (expected true/false)")]
    InvalidBool { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Path to the SQLite database file
    pub database_path: PathBuf,

    /// Whether to seed the demo graph when the store is empty
    pub seed_demo: bool,
}

impl ServerConfig {
    /// Build config from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup(DB_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            Some(path) => {
                tracing::info!("Using database path from {}: {}", DB_PATH_VAR, path);
                PathBuf::from(path)
            }
            None => default_database_path()?,
        };

        let seed_demo = match lookup(SEED_DEMO_VAR) {
            Some(value) => parse_bool(SEED_DEMO_VAR, &value)?,
            None => true,
        };

        Ok(Self {
            database_path,
            seed_demo,
        })
    }
}

/// `~/.webmcp-graph/graph.db`
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
    Ok(home_dir.join(".webmcp-graph").join("graph.db"))
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
