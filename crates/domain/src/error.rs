//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required configuration value is absent or blank.
    #[error("missing configuration value: {0}")]
    MissingConfigValue(String),

    /// The identity-provider authority could not be built into a URL.
    #[error("invalid authority URL: {0}")]
    InvalidAuthority(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
