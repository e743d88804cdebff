//! Authentication state types for UI binding.
//!
//! This module defines the observable aggregate the presentation layer owns
//! and the UI renders:
//! - `AuthPhase`: loading, signed out, or signed in
//! - `AuthAlert`: the error currently shown to the user
//! - `AuthState`: phase + alert + the processing flag

use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::user::AuthenticatedUser;

/// Lifecycle phase of the authentication session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AuthPhase {
    /// Session status not known yet (startup or restore in flight).
    #[default]
    Loading,

    /// No usable session.
    SignedOut,

    /// A user is signed in.
    SignedIn {
        /// The signed-in user.
        user: AuthenticatedUser,
    },
}

impl AuthPhase {
    /// Creates a `SignedIn` phase.
    #[must_use]
    pub const fn signed_in(user: AuthenticatedUser) -> Self {
        Self::SignedIn { user }
    }

    /// Returns true while the phase is `Loading`.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Self::SignedIn { user } => Some(user),
            _ => None,
        }
    }
}

/// Which subsystem raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Sign-in, sign-out or restore failed.
    #[default]
    Authentication,
    /// Map credentials could not be provisioned; the session is intact.
    Provisioning,
}

/// A user-visible error report.
///
/// `id` is a presentation identity so the UI can tell two alerts with the
/// same text apart; equality compares `message` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthAlert {
    /// Unique presentation identity.
    pub id: String,
    /// Text shown to the user.
    pub message: String,
    /// Origin of the alert.
    #[serde(default)]
    pub kind: AlertKind,
}

impl AuthAlert {
    /// Creates an authentication alert.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            message: message.into(),
            kind: AlertKind::Authentication,
        }
    }

    /// Creates a non-fatal provisioning alert.
    #[must_use]
    pub fn provisioning(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Provisioning,
            ..Self::new(message)
        }
    }

    /// Returns true if this alert leaves the session untouched.
    #[must_use]
    pub const fn is_non_fatal(&self) -> bool {
        matches!(self.kind, AlertKind::Provisioning)
    }
}

impl PartialEq for AuthAlert {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl Eq for AuthAlert {}

/// The aggregate observed by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AuthState {
    /// Current lifecycle phase.
    pub phase: AuthPhase,
    /// Alert to show, if any.
    pub alert: Option<AuthAlert>,
    /// True only while a user-initiated sign-in or sign-out runs.
    pub is_processing: bool,
}

impl AuthState {
    /// Returns the alert message, if an alert is shown.
    #[must_use]
    pub fn alert_message(&self) -> Option<&str> {
        self.alert.as_ref().map(|alert| alert.message.as_str())
    }
}
