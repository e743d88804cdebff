//! Map session port
//!
//! The map-tile client accepts a session configuration (bearer token plus
//! client id) and must forget it on sign-out.

use async_trait::async_trait;

use tessera_domain::MapSessionConfig;

/// Errors that can occur when configuring the map session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapSinkError {
    /// A header value cannot be sent over HTTP.
    #[error("invalid header value for {0}")]
    InvalidHeader(String),

    /// The map client cannot accept a session right now.
    #[error("map client unavailable: {0}")]
    Unavailable(String),
}

/// Sink for map-tile session credentials.
#[async_trait]
pub trait MapSessionSink: Send + Sync {
    /// Replaces the session configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be applied.
    async fn configure(&self, config: MapSessionConfig) -> Result<(), MapSinkError>;

    /// Drops any session configuration.
    async fn clear(&self);
}
