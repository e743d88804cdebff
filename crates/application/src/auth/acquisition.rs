//! Token acquisition strategies.
//!
//! Each repository operation picks one strategy explicitly, so the place
//! where a background-looking call may open a sign-in prompt is visible.

use tessera_domain::{AuthError, PresentationContext, TokenResult};
use tracing::debug;

use crate::ports::IdentityProvider;

/// How a token is obtained from the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionStrategy {
    /// Cached or refreshable session only; never prompts.
    Silent,
    /// Always run the user-facing flow.
    Interactive,
    /// Try the cache first; on any failure run the user-facing flow.
    ///
    /// This can surface a prompt from what looks like a background fetch.
    SilentThenInteractive,
}

impl AcquisitionStrategy {
    /// Acquires a token following this strategy.
    ///
    /// # Errors
    /// Returns the error of the last step attempted.
    pub async fn acquire<P>(
        self,
        provider: &P,
        scopes: &[String],
        context: &PresentationContext,
    ) -> Result<TokenResult, AuthError>
    where
        P: IdentityProvider + ?Sized,
    {
        match self {
            Self::Silent => provider.acquire_silent(scopes).await,
            Self::Interactive => provider.acquire_interactive(scopes, context).await,
            Self::SilentThenInteractive => match provider.acquire_silent(scopes).await {
                Ok(result) => Ok(result),
                Err(error) => {
                    debug!(%error, ?scopes, "silent acquisition failed, prompting user");
                    provider.acquire_interactive(scopes, context).await
                }
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use tessera_domain::IdentityAccount;

    #[derive(Default)]
    struct RecordingProvider {
        silent_error: Option<AuthError>,
        interactive_error: Option<AuthError>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingProvider {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().expect("Lock poisoned").clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().expect("Lock poisoned").push(call);
        }
    }

    #[async_trait]
    impl IdentityProvider for RecordingProvider {
        async fn acquire_interactive(
            &self,
            scopes: &[String],
            _: &PresentationContext,
        ) -> Result<TokenResult, AuthError> {
            self.record("interactive");
            match &self.interactive_error {
                Some(error) => Err(error.clone()),
                None => Ok(TokenResult::new(
                    "interactive-token",
                    IdentityAccount::default(),
                    scopes.to_vec(),
                )),
            }
        }

        async fn acquire_silent(&self, scopes: &[String]) -> Result<TokenResult, AuthError> {
            self.record("silent");
            match &self.silent_error {
                Some(error) => Err(error.clone()),
                None => Ok(TokenResult::new(
                    "silent-token",
                    IdentityAccount::default(),
                    scopes.to_vec(),
                )),
            }
        }

        async fn list_accounts(&self) -> Result<Vec<IdentityAccount>, AuthError> {
            Ok(Vec::new())
        }

        async fn remove_account(&self, _: &IdentityAccount) -> Result<(), AuthError> {
            Ok(())
        }
    }

    fn scopes() -> Vec<String> {
        vec!["api://read".to_string()]
    }

    #[tokio::test]
    async fn test_silent_then_interactive_stops_on_silent_success() {
        let provider = RecordingProvider::default();
        let result = AcquisitionStrategy::SilentThenInteractive
            .acquire(&provider, &scopes(), &PresentationContext::default())
            .await
            .unwrap();

        assert_eq!(result.access_token, "silent-token");
        assert_eq!(provider.calls(), vec!["silent"]);
    }

    #[tokio::test]
    async fn test_silent_then_interactive_falls_back() {
        let provider = RecordingProvider {
            silent_error: Some(AuthError::InteractionRequired {
                message: "consent required".to_string(),
            }),
            ..RecordingProvider::default()
        };
        let result = AcquisitionStrategy::SilentThenInteractive
            .acquire(&provider, &scopes(), &PresentationContext::default())
            .await
            .unwrap();

        assert_eq!(result.access_token, "interactive-token");
        assert_eq!(result.scopes, scopes());
        assert_eq!(provider.calls(), vec!["silent", "interactive"]);
    }

    #[tokio::test]
    async fn test_fallback_failure_reports_interactive_error() {
        let provider = RecordingProvider {
            silent_error: Some(AuthError::MissingAccount),
            interactive_error: Some(AuthError::UserCancelled),
            ..RecordingProvider::default()
        };
        let error = AcquisitionStrategy::SilentThenInteractive
            .acquire(&provider, &scopes(), &PresentationContext::default())
            .await
            .unwrap_err();

        assert_eq!(error, AuthError::UserCancelled);
    }

    #[tokio::test]
    async fn test_silent_never_prompts() {
        let provider = RecordingProvider {
            silent_error: Some(AuthError::MissingAccount),
            ..RecordingProvider::default()
        };
        let error = AcquisitionStrategy::Silent
            .acquire(&provider, &scopes(), &PresentationContext::default())
            .await
            .unwrap_err();

        assert_eq!(error, AuthError::MissingAccount);
        assert_eq!(provider.calls(), vec!["silent"]);
    }

    #[tokio::test]
    async fn test_interactive_skips_cache() {
        let provider = RecordingProvider::default();
        AcquisitionStrategy::Interactive
            .acquire(&provider, &scopes(), &PresentationContext::default())
            .await
            .unwrap();

        assert_eq!(provider.calls(), vec!["interactive"]);
    }
}
