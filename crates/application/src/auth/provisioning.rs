//! Map-tile credential provisioning.
//!
//! After a transition into `SignedIn`, the map client needs its own bearer
//! token. The token is requested for the same scopes as the primary sign-in
//! and published together with the map client id.

use std::sync::Arc;

use tessera_domain::{AuthenticationConfig, MapSessionConfig, token_preview};
use tracing::{debug, info};

use crate::error::ProvisioningResult;
use crate::ports::MapSessionSink;
use crate::use_cases::AuthenticationUseCase;

/// What a provisioning run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// No map client id is configured; nothing was published.
    Disabled,
    /// A session configuration was published to the map client.
    Published,
}

/// Acquires map credentials and publishes them to the map client.
pub struct MapTokenProvisioner {
    use_case: Arc<dyn AuthenticationUseCase>,
    sink: Arc<dyn MapSessionSink>,
    scopes: Vec<String>,
    map_client_id: Option<String>,
}

impl MapTokenProvisioner {
    /// Creates a provisioner from the loaded configuration.
    #[must_use]
    pub fn new(
        use_case: Arc<dyn AuthenticationUseCase>,
        sink: Arc<dyn MapSessionSink>,
        config: &AuthenticationConfig,
    ) -> Self {
        Self {
            use_case,
            sink,
            scopes: config.scopes.clone(),
            map_client_id: config.map_client_id().map(str::to_string),
        }
    }

    /// Returns true if a map client id is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.map_client_id.is_some()
    }

    /// Acquires a token and publishes the map session.
    ///
    /// The token request goes through the use case, so it may prompt the user
    /// when the silent path fails.
    ///
    /// # Errors
    /// Returns `ProvisioningError::Token` if the token cannot be acquired, or
    /// `ProvisioningError::Sink` if the map client rejects the session.
    pub async fn provision(&self) -> ProvisioningResult<ProvisionOutcome> {
        let Some(client_id) = self.map_client_id.as_deref() else {
            debug!("map client id not configured, skipping provisioning");
            return Ok(ProvisionOutcome::Disabled);
        };

        let token = self.use_case.get_access_token(&self.scopes).await?;
        debug!(token = %token_preview(&token), "map token acquired");

        self.sink
            .configure(MapSessionConfig::bearer(token, client_id))
            .await?;
        info!(client_id, "map session configured");

        Ok(ProvisionOutcome::Published)
    }

    /// Clears the map session.
    pub async fn revoke(&self) {
        self.sink.clear().await;
        debug!("map session cleared");
    }
}
