//! Configuration loading.
//!
//! The authentication configuration is a JSON document using the upper-case
//! keys of [`AuthenticationConfig`]. It is read once at startup; its absence
//! is fatal for the authentication subsystem.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tessera_domain::{AuthenticationConfig, DomainError};
use tracing::{debug, info};

/// Environment variable overriding the configuration path.
pub const CONFIG_PATH_ENV: &str = "TESSERA_AUTH_CONFIG";

/// File name used when the environment variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "AuthenticationConfig.json";

/// Errors that can occur when loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// The configuration file exists but cannot be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON or misses required keys.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required value is blank.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

/// Resolves the configuration path from an optional override.
#[must_use]
pub fn config_path_from(override_path: Option<OsString>) -> PathBuf {
    override_path
        .filter(|path| !path.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
}

/// Resolves the configuration path from `TESSERA_AUTH_CONFIG`.
#[must_use]
pub fn config_path() -> PathBuf {
    config_path_from(std::env::var_os(CONFIG_PATH_ENV))
}

/// Parses and validates a configuration document.
///
/// # Errors
/// Returns `ConfigError::Parse` or `ConfigError::Invalid`.
pub fn parse_config(json: &str) -> Result<AuthenticationConfig, ConfigError> {
    let config: AuthenticationConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Loads the configuration from a file.
///
/// # Errors
/// Returns `ConfigError::MissingFile` if the file does not exist, or any
/// read, parse or validation error.
pub async fn load_config(path: &Path) -> Result<AuthenticationConfig, ConfigError> {
    debug!(path = %path.display(), "loading authentication configuration");

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_path_buf()),
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let config = parse_config(&json)?;
    info!(
        client_id = %config.client_id,
        policy_scoped = config.is_policy_scoped(),
        map_provisioning = config.map_client_id().is_some(),
        "authentication configuration loaded"
    );
    Ok(config)
}

/// Loads the configuration from the path given by [`config_path`].
///
/// # Errors
/// See [`load_config`].
pub async fn load_default_config() -> Result<AuthenticationConfig, ConfigError> {
    load_config(&config_path()).await
}
