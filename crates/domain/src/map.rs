//! Session configuration handed to the map-tile client.

use std::fmt;

use crate::auth::token_preview;

/// Header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Header carrying the map service client id.
pub const CLIENT_ID_HEADER: &str = "x-ms-client-id";

/// Credentials attached to every tile request.
#[derive(Clone, PartialEq, Eq)]
pub struct MapSessionConfig {
    access_token: String,
    client_id: String,
}

impl MapSessionConfig {
    /// Creates a bearer-token session for the given map client id.
    #[must_use]
    pub fn bearer(access_token: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            client_id: client_id.into(),
        }
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Returns the map client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the headers as name/value pairs.
    #[must_use]
    pub fn headers(&self) -> [(&'static str, String); 2] {
        [
            (AUTHORIZATION_HEADER, self.authorization()),
            (CLIENT_ID_HEADER, self.client_id.clone()),
        ]
    }
}

impl fmt::Debug for MapSessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSessionConfig")
            .field("access_token", &token_preview(&self.access_token))
            .field("client_id", &self.client_id)
            .finish()
    }
}
