//! Repository used when the authentication subsystem cannot start.

use async_trait::async_trait;
use tessera_application::AccountRepository;
use tessera_domain::{AuthError, AuthenticatedUser};

/// [`AccountRepository`] that fails every operation with the same error.
///
/// Lets the UI come up and show the startup error as an alert instead of
/// crashing when the configuration is missing or the provider cannot be
/// built.
#[derive(Debug, Clone)]
pub struct FailingAccountRepository {
    error: AuthError,
}

impl FailingAccountRepository {
    /// Creates a repository failing with `error`.
    #[must_use]
    pub const fn new(error: AuthError) -> Self {
        Self { error }
    }

    /// Returns the error every operation fails with.
    #[must_use]
    pub const fn error(&self) -> &AuthError {
        &self.error
    }
}

#[async_trait]
impl AccountRepository for FailingAccountRepository {
    async fn load_account(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        Err(self.error.clone())
    }

    async fn sign_in(&self) -> Result<AuthenticatedUser, AuthError> {
        Err(self.error.clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Err(self.error.clone())
    }

    async fn get_access_token(&self, _scopes: &[String]) -> Result<String, AuthError> {
        Err(self.error.clone())
    }
}
