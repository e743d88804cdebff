//! Account repository port
//!
//! Mediates between the identity provider and domain-level user records.

use async_trait::async_trait;
use std::sync::Arc;

use tessera_domain::{AuthError, AuthenticatedUser};

/// Repository trait for the signed-in account.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Resolves the current session without user interaction.
    ///
    /// # Returns
    /// `None` when there is no session. Absence of a session is not an error.
    ///
    /// # Errors
    /// Only implementations that cannot reach a provider at all fail here.
    async fn load_account(&self) -> Result<Option<AuthenticatedUser>, AuthError>;

    /// Runs the interactive sign-in flow.
    ///
    /// # Errors
    /// Returns the acquisition failure.
    async fn sign_in(&self) -> Result<AuthenticatedUser, AuthError>;

    /// Removes the first cached account.
    ///
    /// # Errors
    /// Returns `AuthError::MissingAccount` if nothing is cached, or the
    /// removal failure.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Returns an access token for the requested scopes.
    ///
    /// Silent first, then interactive: callers must be ready for a
    /// user-facing prompt.
    ///
    /// # Errors
    /// Returns the interactive acquisition failure.
    async fn get_access_token(&self, scopes: &[String]) -> Result<String, AuthError>;
}

#[async_trait]
impl<T: AccountRepository + ?Sized> AccountRepository for Arc<T> {
    async fn load_account(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        (**self).load_account().await
    }

    async fn sign_in(&self) -> Result<AuthenticatedUser, AuthError> {
        (**self).sign_in().await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        (**self).sign_out().await
    }

    async fn get_access_token(&self, scopes: &[String]) -> Result<String, AuthError> {
        (**self).get_access_token(scopes).await
    }
}
