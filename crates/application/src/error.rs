//! Application error types

use thiserror::Error;
use tessera_domain::AuthError;

use crate::ports::MapSinkError;

/// Failure to hand map credentials to the map client.
///
/// Never affects the authentication phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisioningError {
    /// The map token could not be acquired.
    #[error("could not acquire a map token: {0}")]
    Token(#[from] AuthError),

    /// The map client rejected the session configuration.
    #[error("could not configure the map session: {0}")]
    Sink(#[from] MapSinkError),
}

/// Result type alias for provisioning operations.
pub type ProvisioningResult<T> = Result<T, ProvisioningError>;
