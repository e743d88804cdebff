//! Identity provider port
//!
//! The identity-provider SDK seen as a capability: it owns token caching,
//! refresh and network transport.

use async_trait::async_trait;
use std::sync::Arc;

use tessera_domain::{AuthError, IdentityAccount, PresentationContext, TokenResult};

/// Token acquisition and account management offered by the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Runs the user-facing sign-in flow.
    ///
    /// May suspend for as long as the user takes to respond.
    ///
    /// # Errors
    /// Returns an error if the flow fails or is cancelled.
    async fn acquire_interactive(
        &self,
        scopes: &[String],
        context: &PresentationContext,
    ) -> Result<TokenResult, AuthError>;

    /// Obtains a token from the cached or refreshable session.
    ///
    /// # Errors
    /// Returns an error if no valid cached or refreshable session exists.
    async fn acquire_silent(&self, scopes: &[String]) -> Result<TokenResult, AuthError>;

    /// Lists cached accounts, most relevant first.
    ///
    /// # Errors
    /// Returns an error if the account cache cannot be read.
    async fn list_accounts(&self) -> Result<Vec<IdentityAccount>, AuthError>;

    /// Removes an account and its tokens from the cache.
    ///
    /// # Errors
    /// Returns an error if the account cannot be removed.
    async fn remove_account(&self, account: &IdentityAccount) -> Result<(), AuthError>;
}

#[async_trait]
impl<T: IdentityProvider + ?Sized> IdentityProvider for Arc<T> {
    async fn acquire_interactive(
        &self,
        scopes: &[String],
        context: &PresentationContext,
    ) -> Result<TokenResult, AuthError> {
        (**self).acquire_interactive(scopes, context).await
    }

    async fn acquire_silent(&self, scopes: &[String]) -> Result<TokenResult, AuthError> {
        (**self).acquire_silent(scopes).await
    }

    async fn list_accounts(&self) -> Result<Vec<IdentityAccount>, AuthError> {
        (**self).list_accounts().await
    }

    async fn remove_account(&self, account: &IdentityAccount) -> Result<(), AuthError> {
        (**self).remove_account(account).await
    }
}
