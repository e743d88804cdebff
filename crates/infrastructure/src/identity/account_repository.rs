//! Account repository backed by an identity provider.

use std::sync::Arc;

use async_trait::async_trait;
use tessera_application::{AccountRepository, AcquisitionStrategy, IdentityProvider};
use tessera_domain::{AuthError, AuthenticatedUser, AuthenticationConfig, PresentationContext};
use tracing::{debug, info, warn};

/// [`AccountRepository`] over any [`IdentityProvider`].
///
/// Policies:
/// - `load_account`: silent, then the first cached account, then `None`
/// - `sign_in`: interactive only
/// - `sign_out`: remove the first cached account
/// - `get_access_token`: silent, then interactive
pub struct IdentityAccountRepository<P> {
    provider: P,
    config: Arc<AuthenticationConfig>,
}

impl<P: IdentityProvider> IdentityAccountRepository<P> {
    /// Creates a repository requesting the configured scopes.
    pub const fn new(provider: P, config: Arc<AuthenticationConfig>) -> Self {
        Self { provider, config }
    }

    fn scopes(&self) -> &[String] {
        &self.config.scopes
    }
}

#[async_trait]
impl<P: IdentityProvider> AccountRepository for IdentityAccountRepository<P> {
    async fn load_account(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        match AcquisitionStrategy::Silent
            .acquire(&self.provider, self.scopes(), &PresentationContext::default())
            .await
        {
            Ok(result) => {
                let user = AuthenticatedUser::from_token_result(&result);
                info!(object_id = %user.object_id, "session restored silently");
                return Ok(Some(user));
            }
            Err(error) if error.is_no_session() => {
                debug!(%error, "no silent session, checking cached accounts");
            }
            Err(error) => warn!(%error, "silent restore failed, checking cached accounts"),
        }

        // No fresh claims here: the user is synthesized from the cached account.
        match self.provider.list_accounts().await {
            Ok(accounts) => {
                let user = accounts.first().map(AuthenticatedUser::from_account);
                match &user {
                    Some(user) => info!(object_id = %user.object_id, "restored from cached account"),
                    None => debug!("no cached account"),
                }
                Ok(user)
            }
            Err(error) => {
                warn!(%error, "listing cached accounts failed, treating as signed out");
                Ok(None)
            }
        }
    }

    async fn sign_in(&self) -> Result<AuthenticatedUser, AuthError> {
        debug!(scopes = ?self.scopes(), "starting interactive sign-in");
        let result = AcquisitionStrategy::Interactive
            .acquire(
                &self.provider,
                self.scopes(),
                &PresentationContext::select_account(),
            )
            .await
            .inspect_err(|error| warn!(%error, "interactive sign-in failed"))?;

        let user = AuthenticatedUser::from_token_result(&result);
        info!(object_id = %user.object_id, "signed in");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let account = self
            .provider
            .list_accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(AuthError::MissingAccount)?;

        self.provider.remove_account(&account).await?;
        info!("account removed");
        Ok(())
    }

    async fn get_access_token(&self, scopes: &[String]) -> Result<String, AuthError> {
        let result = AcquisitionStrategy::SilentThenInteractive
            .acquire(&self.provider, scopes, &PresentationContext::if_necessary())
            .await?;
        Ok(result.access_token)
    }
}
