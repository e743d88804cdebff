//! Map session implementation using reqwest.
//!
//! This adapter implements the `MapSessionSink` port. A configured session is
//! a `reqwest::Client` whose default headers carry the bearer token and the
//! map client id, ready for tile requests.

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use tessera_application::{MapSessionSink, MapSinkError};
use tessera_domain::MapSessionConfig;
use tracing::debug;

struct ActiveSession {
    client: Client,
    client_id: String,
}

/// Holds the HTTP client used for authenticated tile requests.
#[derive(Default)]
pub struct ReqwestMapSession {
    session: RwLock<Option<ActiveSession>>,
}

impl ReqwestMapSession {
    /// Creates an unconfigured session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the client for tile requests, if a session is configured.
    #[must_use]
    pub fn client(&self) -> Option<Client> {
        self.session.read().as_ref().map(|session| session.client.clone())
    }

    /// Returns the configured map client id.
    #[must_use]
    pub fn client_id(&self) -> Option<String> {
        self.session
            .read()
            .as_ref()
            .map(|session| session.client_id.clone())
    }

    /// Returns true if a session is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.session.read().is_some()
    }

    /// Builds the default headers for a session.
    fn build_headers(config: &MapSessionConfig) -> Result<HeaderMap, MapSinkError> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| MapSinkError::InvalidHeader(name.to_string()))?;
            let mut header_value = HeaderValue::from_str(&value)
                .map_err(|_| MapSinkError::InvalidHeader(name.to_string()))?;
            if header_name == AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl MapSessionSink for ReqwestMapSession {
    async fn configure(&self, config: MapSessionConfig) -> Result<(), MapSinkError> {
        let headers = Self::build_headers(&config)?;
        let client = Client::builder()
            .user_agent(concat!("Tessera/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| MapSinkError::Unavailable(e.to_string()))?;

        debug!(?config, "map session configured");
        *self.session.write() = Some(ActiveSession {
            client,
            client_id: config.client_id().to_string(),
        });
        Ok(())
    }

    async fn clear(&self) {
        if self.session.write().take().is_some() {
            debug!("map session cleared");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_headers() {
        let headers =
            ReqwestMapSession::build_headers(&MapSessionConfig::bearer("token", "maps-client"))
                .unwrap();

        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer token");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
        assert_eq!(headers.get("x-ms-client-id").unwrap(), "maps-client");
    }

    #[tokio::test]
    async fn test_configure_and_clear() {
        let session = ReqwestMapSession::new();
        assert!(!session.is_configured());

        session
            .configure(MapSessionConfig::bearer("token", "maps-client"))
            .await
            .unwrap();

        assert!(session.is_configured());
        assert!(session.client().is_some());
        assert_eq!(session.client_id().as_deref(), Some("maps-client"));

        session.clear().await;

        assert!(!session.is_configured());
        assert!(session.client().is_none());
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected_and_keeps_previous_session() {
        let session = ReqwestMapSession::new();
        session
            .configure(MapSessionConfig::bearer("good", "maps-client"))
            .await
            .unwrap();

        let error = session
            .configure(MapSessionConfig::bearer("bad\ntoken", "maps-client"))
            .await
            .unwrap_err();

        assert_eq!(error, MapSinkError::InvalidHeader("Authorization".to_string()));
        assert!(session.is_configured());
    }
}
