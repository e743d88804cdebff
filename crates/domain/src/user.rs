//! The signed-in user record.

use serde::{Deserialize, Serialize};

use crate::auth::{IdentityAccount, TokenResult};

/// Immutable record of the signed-in user.
///
/// Identity is `object_id`; equality compares every present field. A new
/// record replaces the old one on re-authentication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Name shown in the UI.
    pub display_name: String,
    /// Email address, when the provider exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Directory object identifier.
    pub object_id: String,
}

impl AuthenticatedUser {
    /// Creates a user with an email address.
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: Some(email.into()),
            object_id: object_id.into(),
        }
    }

    /// Derives a user from a fresh acquisition result.
    ///
    /// Claims win over the raw account fields:
    /// - display name: `name` claim, then the username
    /// - email: `email` claim, then the first `emails` entry, then the username
    /// - object id: the account identifier, then the `oid` claim
    #[must_use]
    pub fn from_token_result(result: &TokenResult) -> Self {
        let username = non_blank(result.account.username.as_deref());

        let display_name = result
            .claim_str("name")
            .or(username)
            .unwrap_or_default()
            .to_string();

        let email = result
            .claim_str("email")
            .or_else(|| result.first_claim_str("emails"))
            .or(username)
            .map(str::to_string);

        let object_id = non_blank(result.account.identifier.as_deref())
            .or_else(|| result.claim_str("oid"))
            .unwrap_or_default()
            .to_string();

        Self {
            display_name,
            email,
            object_id,
        }
    }

    /// Synthesizes a user from a cached account.
    ///
    /// Lower fidelity than [`Self::from_token_result`]: no claims are
    /// available, so the username doubles as display name and email.
    #[must_use]
    pub fn from_account(account: &IdentityAccount) -> Self {
        let username = non_blank(account.username.as_deref());
        Self {
            display_name: username.unwrap_or_default().to_string(),
            email: username.map(str::to_string),
            object_id: account.identifier.clone().unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
