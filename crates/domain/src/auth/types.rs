//! Identity-provider value types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An account known to the identity provider's cache.
///
/// Both fields are optional because providers do not guarantee them for
/// every account kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IdentityAccount {
    /// Sign-in name (usually an email address).
    pub username: Option<String>,
    /// Provider-assigned home account identifier.
    pub identifier: Option<String>,
}

impl IdentityAccount {
    /// Creates an account with both fields present.
    #[must_use]
    pub fn new(username: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            identifier: Some(identifier.into()),
        }
    }
}

/// Outcome of a successful token acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResult {
    /// The access token string.
    pub access_token: String,
    /// Account the token was issued for.
    pub account: IdentityAccount,
    /// Scopes granted by this token.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Claims from the ID token.
    #[serde(default)]
    pub claims: BTreeMap<String, Value>,
}

impl TokenResult {
    /// Creates a result without claims.
    #[must_use]
    pub fn new(access_token: impl Into<String>, account: IdentityAccount, scopes: Vec<String>) -> Self {
        Self {
            access_token: access_token.into(),
            account,
            scopes,
            claims: BTreeMap::new(),
        }
    }

    /// Adds a claim.
    #[must_use]
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(name.into(), value.into());
        self
    }

    /// Returns a non-blank string claim.
    #[must_use]
    pub fn claim_str(&self, name: &str) -> Option<&str> {
        self.claims
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Returns the first non-blank entry of an array-of-strings claim.
    #[must_use]
    pub fn first_claim_str(&self, name: &str) -> Option<&str> {
        self.claims
            .get(name)
            .and_then(Value::as_array)
            .and_then(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .find(|s| !s.trim().is_empty())
            })
    }
}

/// How the interactive flow should prompt the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    /// Prompt only when the provider cannot complete the request otherwise.
    #[default]
    IfNecessary,
    /// Let the user pick among cached accounts or add one.
    SelectAccount,
}

/// Parameters the identity provider needs to present an interactive flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresentationContext {
    /// Prompt behaviour.
    pub prompt: Prompt,
}

impl PresentationContext {
    /// Context for an explicit, user-initiated sign-in.
    #[must_use]
    pub const fn select_account() -> Self {
        Self {
            prompt: Prompt::SelectAccount,
        }
    }

    /// Context for a token request that falls back to the user-facing flow.
    #[must_use]
    pub const fn if_necessary() -> Self {
        Self {
            prompt: Prompt::IfNecessary,
        }
    }
}

/// Authentication errors.
///
/// The `Display` text is what the user sees in an alert.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No cached account exists.
    #[error("no signed-in account is available")]
    MissingAccount,
    /// Silent acquisition cannot proceed without user interaction.
    #[error("user interaction is required: {message}")]
    InteractionRequired {
        /// Error description.
        message: String,
    },
    /// User cancelled the interactive flow.
    #[error("sign-in was cancelled")]
    UserCancelled,
    /// No window or view is available to host the interactive flow.
    #[error("no window is available to present sign-in")]
    PresentationUnavailable,
    /// Removing the account from the cache failed.
    #[error("failed to remove account: {message}")]
    RemoveAccountFailed {
        /// Error description.
        message: String,
    },
    /// Network error.
    #[error("network error: {message}")]
    Network {
        /// Error description.
        message: String,
    },
    /// The identity provider rejected the request.
    #[error("identity provider error: {message}")]
    Provider {
        /// Error description.
        message: String,
    },
    /// The authentication subsystem is not configured.
    #[error("authentication is not configured: {message}")]
    Configuration {
        /// Error description.
        message: String,
    },
}

impl AuthError {
    /// Creates a provider error.
    #[must_use]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true if this error only means "there is no session".
    #[must_use]
    pub const fn is_no_session(&self) -> bool {
        matches!(self, Self::MissingAccount | Self::InteractionRequired { .. })
    }
}

/// Get a preview of an access token (first 8 chars + ...) for logs.
///
/// Tokens of 12 characters or fewer are fully masked.
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.len() > 12
        && let Some(head) = token.get(..8)
    {
        format!("{head}...")
    } else {
        "...".to_string()
    }
}
