//! # Application Configuration
//!
//! Optional TOML configuration file (`renalc.toml` by default).
//! Precedence: CLI flags win over the config file, the config file wins
//! over built-in defaults. A missing default config file is not an error;
//! a config path given explicitly must exist.

use renalc_core::RenalError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default history file location, relative to the working directory.
pub const DEFAULT_HISTORY_PATH: &str = "data/kidney_history.csv";

/// Default config file probed when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "renalc.toml";

// =============================================================================
// CONFIG STRUCTURES
// =============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the append-only history CSV.
    pub history_path: Option<PathBuf>,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP server section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist and parse. Without one,
    /// `renalc.toml` is probed and silently skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, RenalError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| RenalError::Io(format!("read config {:?}: {}", path, e)))?;

        toml::from_str(&contents)
            .map_err(|e| RenalError::Serialization(format!("parse config {:?}: {}", path, e)))
    }

    /// Resolve the history path: CLI flag, then config, then default.
    #[must_use]
    pub fn resolve_history_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.history_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_file() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.resolve_history_path(None),
            PathBuf::from(DEFAULT_HISTORY_PATH)
        );
    }

    #[test]
    fn parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            history_path = "/tmp/h.csv"

            [server]
            host = "0.0.0.0"
            port = 9999
            "#,
        )
        .expect("parse");

        assert_eq!(config.history_path, Some(PathBuf::from("/tmp/h.csv")));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn cli_flag_wins_over_config() {
        let config: Config = toml::from_str("history_path = \"/tmp/from-config.csv\"")
            .expect("parse");
        let resolved = config.resolve_history_path(Some(Path::new("/tmp/from-cli.csv")));
        assert_eq!(resolved, PathBuf::from("/tmp/from-cli.csv"));
    }

    #[test]
    fn unknown_fields_rejected() {
        let parsed = toml::from_str::<Config>("nonsense = 1");
        assert!(parsed.is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(err.is_err());
    }
}
