//! Authentication use case
//!
//! The boundary the presentation layer depends on. It forwards every call to
//! the account repository unchanged so tests can substitute either side.

use async_trait::async_trait;

use tessera_domain::{AuthError, AuthenticatedUser};

use crate::ports::AccountRepository;

/// Authentication operations available to the presentation layer.
#[async_trait]
pub trait AuthenticationUseCase: Send + Sync {
    /// Restores the session without user interaction.
    ///
    /// # Errors
    /// Returns an error only if the repository cannot be reached.
    async fn load_account(&self) -> Result<Option<AuthenticatedUser>, AuthError>;

    /// Signs the user in interactively.
    ///
    /// # Errors
    /// Returns the acquisition failure.
    async fn sign_in(&self) -> Result<AuthenticatedUser, AuthError>;

    /// Signs the current user out.
    ///
    /// # Errors
    /// Returns `AuthError::MissingAccount` or the removal failure.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Returns an access token for the given scopes, prompting if needed.
    ///
    /// # Errors
    /// Returns the acquisition failure.
    async fn get_access_token(&self, scopes: &[String]) -> Result<String, AuthError>;
}

/// Forwards every operation to an [`AccountRepository`].
pub struct DefaultAuthenticationUseCase<R> {
    repository: R,
}

impl<R: AccountRepository> DefaultAuthenticationUseCase<R> {
    /// Creates a new `DefaultAuthenticationUseCase`.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: AccountRepository> AuthenticationUseCase for DefaultAuthenticationUseCase<R> {
    async fn load_account(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        self.repository.load_account().await
    }

    async fn sign_in(&self) -> Result<AuthenticatedUser, AuthError> {
        self.repository.sign_in().await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.repository.sign_out().await
    }

    async fn get_access_token(&self, scopes: &[String]) -> Result<String, AuthError> {
        self.repository.get_access_token(scopes).await
    }
}
