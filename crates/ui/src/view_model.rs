//! Authentication state machine.
//!
//! `AuthViewModel` owns the observable [`AuthState`] and drives it through
//! `Loading`, `SignedOut` and `SignedIn`. After every transition into
//! `SignedIn` it spawns map credential provisioning as a detached task whose
//! failures only ever reach the alert field.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tessera_application::{AuthenticationUseCase, MapTokenProvisioner};
use tessera_domain::{AuthAlert, AuthPhase, AuthState};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::state::AuthStateStore;

/// Prefix of the alert raised when map provisioning fails.
const PROVISIONING_ALERT_PREFIX: &str = "Signed in, but map personalization is unavailable";

/// Drives the authentication lifecycle and publishes it to observers.
pub struct AuthViewModel {
    use_case: Arc<dyn AuthenticationUseCase>,
    provisioner: Option<Arc<MapTokenProvisioner>>,
    store: AuthStateStore,
    processing: AtomicBool,
    provisioning: Mutex<Option<JoinHandle<()>>>,
}

impl AuthViewModel {
    /// Creates a view model in the `Loading` phase without map provisioning.
    #[must_use]
    pub fn new(use_case: Arc<dyn AuthenticationUseCase>) -> Self {
        Self {
            use_case,
            provisioner: None,
            store: AuthStateStore::new(),
            processing: AtomicBool::new(false),
            provisioning: Mutex::new(None),
        }
    }

    /// Enables map credential provisioning after each sign-in.
    #[must_use]
    pub fn with_map_provisioning(mut self, provisioner: MapTokenProvisioner) -> Self {
        self.provisioner = Some(Arc::new(provisioner));
        self
    }

    /// Publishes into an existing store instead of a fresh one.
    #[must_use]
    pub fn with_store(mut self, store: AuthStateStore) -> Self {
        self.store = store;
        self
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.store.snapshot()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.store.subscribe()
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &AuthStateStore {
        &self.store
    }

    /// Restores the session without user interaction.
    ///
    /// Enters `Loading`, clears the alert and resolves to `SignedIn` or
    /// `SignedOut`. Errors become a `SignedOut` phase plus an alert. Pending
    /// provisioning is aborted on entry; the map session itself is kept. Safe
    /// to call repeatedly, but not guarded against a concurrent
    /// [`sign_in`](Self::sign_in): call it before any user-initiated operation.
    pub async fn restore(&self) {
        self.abort_provisioning();
        self.store.update(|state| {
            state.phase = AuthPhase::Loading;
            state.alert = None;
        });

        match self.use_case.load_account().await {
            Ok(Some(user)) => {
                info!(object_id = %user.object_id, "session restored");
                self.store
                    .update(|state| state.phase = AuthPhase::signed_in(user));
                self.start_provisioning();
            }
            Ok(None) => {
                info!("no session to restore");
                self.store.update(|state| state.phase = AuthPhase::SignedOut);
            }
            Err(error) => {
                warn!(%error, "session restore failed");
                self.store.update(|state| {
                    state.phase = AuthPhase::SignedOut;
                    state.alert = Some(AuthAlert::new(error.to_string()));
                });
            }
        }
    }

    /// Signs the user in interactively.
    ///
    /// Dropped without effect while another sign-in or sign-out runs. On
    /// failure the phase is forced to `SignedOut` and the alert set; pending
    /// provisioning is aborted and, if a session was active, the map session
    /// is cleared.
    pub async fn sign_in(&self) {
        let Some(_guard) = ProcessingGuard::try_acquire(&self.processing, &self.store) else {
            debug!("sign-in dropped, another operation is in progress");
            return;
        };
        self.store.update(|state| state.alert = None);

        match self.use_case.sign_in().await {
            Ok(user) => {
                info!(object_id = %user.object_id, "signed in");
                self.store
                    .update(|state| state.phase = AuthPhase::signed_in(user));
                self.start_provisioning();
            }
            Err(error) => {
                warn!(%error, "sign-in failed");
                self.abort_provisioning();
                let mut was_signed_in = false;
                self.store.update(|state| {
                    was_signed_in = state.phase.is_signed_in();
                    state.phase = AuthPhase::SignedOut;
                    state.alert = Some(AuthAlert::new(error.to_string()));
                });
                if was_signed_in && let Some(provisioner) = &self.provisioner {
                    provisioner.revoke().await;
                }
            }
        }
    }

    /// Signs the current user out.
    ///
    /// Dropped without effect while another sign-in or sign-out runs. On
    /// success any pending provisioning is aborted and the map session
    /// cleared. On failure the alert is set and the phase left unchanged.
    pub async fn sign_out(&self) {
        let Some(_guard) = ProcessingGuard::try_acquire(&self.processing, &self.store) else {
            debug!("sign-out dropped, another operation is in progress");
            return;
        };
        self.store.update(|state| state.alert = None);

        match self.use_case.sign_out().await {
            Ok(()) => {
                self.abort_provisioning();
                self.store.update(|state| state.phase = AuthPhase::SignedOut);
                if let Some(provisioner) = &self.provisioner {
                    provisioner.revoke().await;
                }
                info!("signed out");
            }
            Err(error) => {
                warn!(%error, "sign-out failed");
                self.store
                    .update(|state| state.alert = Some(AuthAlert::new(error.to_string())));
            }
        }
    }

    /// Clears the current alert.
    pub fn dismiss_alert(&self) {
        self.store.update(|state| state.alert = None);
    }

    /// Waits for the pending provisioning task, if any.
    pub async fn settle_provisioning(&self) {
        let pending = self.provisioning.lock().take();
        let Some(task) = pending else {
            return;
        };
        if let Err(error) = task.await
            && !error.is_cancelled()
        {
            warn!(%error, "map provisioning task panicked");
        }
    }

    /// Returns true while a provisioning task is registered and unfinished.
    #[must_use]
    pub fn is_provisioning(&self) -> bool {
        self.provisioning
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Spawns provisioning, replacing any task still pending.
    ///
    /// The token request may fall back to an interactive prompt.
    fn start_provisioning(&self) {
        let Some(provisioner) = self.provisioner.clone() else {
            return;
        };
        let store = self.store.clone();

        let task = tokio::spawn(
            async move {
                match provisioner.provision().await {
                    Ok(outcome) => debug!(?outcome, "map provisioning finished"),
                    Err(error) => {
                        warn!(%error, "map provisioning failed");
                        store.update(|state| {
                            if state.phase.is_signed_in() {
                                state.alert = Some(AuthAlert::provisioning(format!(
                                    "{PROVISIONING_ALERT_PREFIX}: {error}"
                                )));
                            }
                        });
                    }
                }
            }
            .instrument(info_span!("map_provisioning")),
        );

        let previous = self.provisioning.lock().replace(task);
        if let Some(previous) = previous {
            previous.abort();
            debug!("replaced pending map provisioning");
        }
    }

    fn abort_provisioning(&self) {
        let pending = self.provisioning.lock().take();
        if let Some(task) = pending {
            task.abort();
            debug!("aborted pending map provisioning");
        }
    }
}

/// Single-permit, non-blocking guard over the processing flag.
///
/// A caller that fails to acquire it is dropped, not queued. Dropping the
/// guard releases the permit and clears `is_processing` on every exit path.
struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
    store: &'a AuthStateStore,
}

impl<'a> ProcessingGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool, store: &'a AuthStateStore) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        store.update(|state| state.is_processing = true);
        Some(Self { flag, store })
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.store.update(|state| state.is_processing = false);
        self.flag.store(false, Ordering::Release);
    }
}
