//! Composition root.
//!
//! Wires the identity provider, repository, use case, map provisioning and
//! view model together. Startup failures never abort: they are replaced by a
//! repository that fails every operation so the screen can show the error.

use std::fmt::Display;
use std::sync::Arc;

use tessera_application::{
    AuthenticationUseCase, DefaultAuthenticationUseCase, IdentityProvider, MapSessionSink,
    MapTokenProvisioner,
};
use tessera_domain::{AuthError, AuthenticationConfig};
use tessera_infrastructure::{
    ConfigError, FailingAccountRepository, IdentityAccountRepository, load_default_config,
};
use tracing::{error, info};

use crate::view_model::AuthViewModel;

/// Builds the view model from a loaded (or failed) configuration.
///
/// `provider_factory` receives the validated configuration and builds the
/// identity provider for it. A configuration error or a factory error yields
/// a view model whose every operation reports that error as an alert.
pub fn compose<P, F, E>(
    config: Result<AuthenticationConfig, ConfigError>,
    provider_factory: F,
    sink: Arc<dyn MapSessionSink>,
) -> AuthViewModel
where
    P: IdentityProvider + 'static,
    F: FnOnce(&AuthenticationConfig) -> Result<P, E>,
    E: Display,
{
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "authentication configuration unavailable");
            return failing(AuthError::configuration(err.to_string()));
        }
    };

    let provider = match provider_factory(&config) {
        Ok(provider) => provider,
        Err(err) => {
            error!(error = %err, "identity provider could not be created");
            return failing(AuthError::configuration(format!(
                "identity provider unavailable: {err}"
            )));
        }
    };

    let config = Arc::new(config);
    let repository = IdentityAccountRepository::new(provider, Arc::clone(&config));
    let use_case: Arc<dyn AuthenticationUseCase> =
        Arc::new(DefaultAuthenticationUseCase::new(repository));
    let provisioner = MapTokenProvisioner::new(Arc::clone(&use_case), sink, &config);

    info!(
        client_id = %config.client_id,
        policy_scoped = config.is_policy_scoped(),
        map_provisioning = provisioner.is_enabled(),
        "authentication composed"
    );

    AuthViewModel::new(use_case).with_map_provisioning(provisioner)
}

/// Loads the configuration from `TESSERA_AUTH_CONFIG` (or the default file)
/// and composes the view model.
pub async fn compose_from_default_config<P, F, E>(
    provider_factory: F,
    sink: Arc<dyn MapSessionSink>,
) -> AuthViewModel
where
    P: IdentityProvider + 'static,
    F: FnOnce(&AuthenticationConfig) -> Result<P, E>,
    E: Display,
{
    compose(load_default_config().await, provider_factory, sink)
}

fn failing(error: AuthError) -> AuthViewModel {
    let repository = FailingAccountRepository::new(error);
    AuthViewModel::new(Arc::new(DefaultAuthenticationUseCase::new(repository)))
}
