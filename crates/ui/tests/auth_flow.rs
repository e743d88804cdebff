//! End-to-end authentication flow
//!
//! Drives the composed stack (configuration file, account repository, use
//! case, view model, reqwest map session) against an in-memory identity
//! provider.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use tessera_application::IdentityProvider;
use tessera_domain::{
    AuthError, AuthPhase, AuthenticatedUser, IdentityAccount, PresentationContext, Prompt,
    TokenResult,
};
use tessera_infrastructure::{ReqwestMapSession, load_config};
use tessera_ui::{AuthScreen, AuthViewModel, ScreenBody, UiCommand, compose, run_command_loop};
use tokio::sync::mpsc;

const CONFIG: &str = r#"{
    "CLIENT_ID": "00000000-0000-0000-0000-000000000001",
    "TENANT_DOMAIN": "contoso",
    "POLICY_NAME": "B2C_1_signupsignin",
    "REDIRECT_URI": "msauth.com.example.tessera://auth",
    "SCOPES": ["https://contoso.onmicrosoft.com/api/tiles.read"],
    "MAP_CLIENT_ID": "maps-client"
}"#;

/// In-memory identity provider with a single-account cache.
#[derive(Default)]
struct InMemoryProvider {
    cache: Mutex<Vec<IdentityAccount>>,
    interactive_calls: Mutex<Vec<Prompt>>,
    interactive_limit: Option<usize>,
}

impl InMemoryProvider {
    fn account() -> IdentityAccount {
        IdentityAccount::new("taro@example.com", "object-1")
    }

    fn token(scopes: &[String]) -> TokenResult {
        TokenResult::new("fresh-token", Self::account(), scopes.to_vec())
            .with_claim("name", "Tanaka Taro")
            .with_claim("emails", serde_json::json!(["taro@example.com"]))
    }

    fn interactive_count(&self) -> usize {
        self.interactive_calls.lock().expect("Lock poisoned").len()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryProvider {
    async fn acquire_interactive(
        &self,
        scopes: &[String],
        context: &PresentationContext,
    ) -> Result<TokenResult, AuthError> {
        let mut calls = self.interactive_calls.lock().expect("Lock poisoned");
        if self.interactive_limit.is_some_and(|limit| calls.len() >= limit) {
            return Err(AuthError::PresentationUnavailable);
        }
        calls.push(context.prompt);
        *self.cache.lock().expect("Lock poisoned") = vec![Self::account()];
        Ok(Self::token(scopes))
    }

    async fn acquire_silent(&self, scopes: &[String]) -> Result<TokenResult, AuthError> {
        if self.cache.lock().expect("Lock poisoned").is_empty() {
            return Err(AuthError::InteractionRequired {
                message: "no cached session".to_string(),
            });
        }
        Ok(Self::token(scopes))
    }

    async fn list_accounts(&self) -> Result<Vec<IdentityAccount>, AuthError> {
        Ok(self.cache.lock().expect("Lock poisoned").clone())
    }

    async fn remove_account(&self, account: &IdentityAccount) -> Result<(), AuthError> {
        self.cache
            .lock()
            .expect("Lock poisoned")
            .retain(|cached| cached != account);
        Ok(())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn compose_with(
    provider: Arc<InMemoryProvider>,
    sink: Arc<ReqwestMapSession>,
) -> AuthViewModel {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("AuthenticationConfig.json");
    tokio::fs::write(&path, CONFIG)
        .await
        .expect("Failed to write config");

    compose(
        load_config(&path).await,
        |config| {
            assert!(config.is_policy_scoped());
            Ok::<_, AuthError>(provider)
        },
        sink,
    )
}

fn expected_user() -> AuthenticatedUser {
    AuthenticatedUser::new("Tanaka Taro", "taro@example.com", "object-1")
}

#[tokio::test]
async fn test_sign_in_provisions_and_sign_out_clears() {
    init_tracing();
    let provider = Arc::new(InMemoryProvider::default());
    let sink = Arc::new(ReqwestMapSession::new());
    let view_model = compose_with(provider.clone(), sink.clone()).await;

    view_model.restore().await;
    assert_eq!(view_model.state().phase, AuthPhase::SignedOut);
    assert_eq!(provider.interactive_count(), 0);

    view_model.sign_in().await;
    view_model.settle_provisioning().await;

    let state = view_model.state();
    assert_eq!(state.phase, AuthPhase::signed_in(expected_user()));
    assert_eq!(state.alert, None);
    assert!(!state.is_processing);
    assert_eq!(
        *provider.interactive_calls.lock().expect("Lock poisoned"),
        vec![Prompt::SelectAccount]
    );
    assert_eq!(sink.client_id().as_deref(), Some("maps-client"));

    view_model.sign_out().await;

    let state = view_model.state();
    assert_eq!(state.phase, AuthPhase::SignedOut);
    assert!(!sink.is_configured());
    assert!(provider.cache.lock().expect("Lock poisoned").is_empty());
}

#[tokio::test]
async fn test_restore_uses_cached_session_without_prompting() {
    init_tracing();
    let provider = Arc::new(InMemoryProvider::default());
    *provider.cache.lock().expect("Lock poisoned") = vec![InMemoryProvider::account()];
    let sink = Arc::new(ReqwestMapSession::new());
    let view_model = compose_with(provider.clone(), sink.clone()).await;

    for _ in 0..2 {
        view_model.restore().await;
        view_model.settle_provisioning().await;
        assert_eq!(
            view_model.state().phase,
            AuthPhase::signed_in(expected_user())
        );
    }

    assert_eq!(provider.interactive_count(), 0);
    assert!(sink.is_configured());
}

#[tokio::test]
async fn test_provisioning_failure_is_non_fatal() {
    init_tracing();
    let provider = Arc::new(InMemoryProvider {
        interactive_limit: Some(1),
        ..InMemoryProvider::default()
    });
    let sink = Arc::new(ReqwestMapSession::new());
    let view_model = compose_with(provider.clone(), sink.clone()).await;

    view_model.sign_in().await;
    // The sign-in cached the account; drop it so the map token needs a prompt.
    provider.cache.lock().expect("Lock poisoned").clear();
    view_model.settle_provisioning().await;

    let state = view_model.state();
    assert_eq!(state.phase, AuthPhase::signed_in(expected_user()));
    let alert = state.alert.expect("provisioning alert");
    assert!(alert.is_non_fatal());
    assert!(alert.message.contains("no window is available"));
    assert!(!sink.is_configured());
}

#[tokio::test]
async fn test_screen_follows_commands() {
    init_tracing();
    let provider = Arc::new(InMemoryProvider::default());
    let sink = Arc::new(ReqwestMapSession::new());
    let view_model = Arc::new(compose_with(provider, sink).await);
    let (sender, receiver) = mpsc::unbounded_channel();
    let runner = tokio::spawn(run_command_loop(view_model.clone(), receiver));
    let mut state = view_model.subscribe();

    assert_eq!(AuthScreen::from(&view_model.state()).body, ScreenBody::Loading);

    sender.send(UiCommand::Restore).unwrap();
    state
        .wait_for(|s| s.phase == AuthPhase::SignedOut)
        .await
        .unwrap();

    sender.send(UiCommand::SignIn).unwrap();
    state
        .wait_for(|s| s.phase.is_signed_in() && !s.is_processing)
        .await
        .unwrap();

    let screen = AuthScreen::from(&view_model.state());
    match screen.body {
        ScreenBody::SignedIn { title, rows, .. } => {
            assert_eq!(title, "Welcome, Tanaka Taro");
            assert_eq!(rows.len(), 2);
        }
        other => panic!("unexpected screen: {other:?}"),
    }
    assert!(screen.action_enabled);

    drop(sender);
    runner.await.unwrap();
    view_model.settle_provisioning().await;
}
