//! Render-ready projection of the authentication state.
//!
//! Renderers bind to [`AuthScreen`] instead of interpreting [`AuthState`]
//! themselves.

use tessera_domain::{AuthPhase, AuthState, AuthenticatedUser};

/// Title shown above the sign-in action.
pub const SIGNED_OUT_TITLE: &str = "Microsoft Entra B2C";
/// Label of the sign-in action.
pub const SIGN_IN_LABEL: &str = "Sign In / Sign Up";
/// Label of the sign-out action.
pub const SIGN_OUT_LABEL: &str = "Sign Out";
/// Title of the alert dialog.
pub const ALERT_TITLE: &str = "Error";

/// A label/value row describing the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    /// Row label.
    pub label: &'static str,
    /// Row value.
    pub value: String,
}

/// Main content of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenBody {
    /// Spinner only.
    Loading,
    /// Title and the sign-in action.
    SignedOut {
        /// Title text.
        title: &'static str,
        /// Sign-in action label.
        action: &'static str,
    },
    /// Welcome text, user rows and the sign-out action.
    SignedIn {
        /// Welcome text.
        title: String,
        /// User details.
        rows: Vec<InfoRow>,
        /// Sign-out action label.
        action: &'static str,
    },
}

/// Alert dialog content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDialog {
    /// Identity used to tell successive alerts apart.
    pub id: String,
    /// Dialog title.
    pub title: &'static str,
    /// Dialog message.
    pub message: String,
    /// True for alerts that leave the session intact.
    pub non_fatal: bool,
}

/// Everything a renderer draws for one [`AuthState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthScreen {
    /// Main content.
    pub body: ScreenBody,
    /// Processing overlay visibility.
    pub processing_overlay: bool,
    /// Whether the sign-in/sign-out action accepts input.
    pub action_enabled: bool,
    /// Alert to present, if any.
    pub alert: Option<AlertDialog>,
}

impl AuthScreen {
    /// Returns true if a spinner is visible anywhere on screen.
    #[must_use]
    pub const fn shows_spinner(&self) -> bool {
        matches!(self.body, ScreenBody::Loading) || self.processing_overlay
    }
}

impl From<&AuthState> for AuthScreen {
    fn from(state: &AuthState) -> Self {
        let body = match &state.phase {
            AuthPhase::Loading => ScreenBody::Loading,
            AuthPhase::SignedOut => ScreenBody::SignedOut {
                title: SIGNED_OUT_TITLE,
                action: SIGN_IN_LABEL,
            },
            AuthPhase::SignedIn { user } => ScreenBody::SignedIn {
                title: format!("Welcome, {}", user.display_name),
                rows: user_rows(user),
                action: SIGN_OUT_LABEL,
            },
        };

        Self {
            body,
            processing_overlay: state.is_processing,
            action_enabled: !state.is_processing,
            alert: state.alert.as_ref().map(|alert| AlertDialog {
                id: alert.id.clone(),
                title: ALERT_TITLE,
                message: alert.message.clone(),
                non_fatal: alert.is_non_fatal(),
            }),
        }
    }
}

fn user_rows(user: &AuthenticatedUser) -> Vec<InfoRow> {
    let mut rows = Vec::with_capacity(2);
    if let Some(email) = &user.email {
        rows.push(InfoRow {
            label: "Email",
            value: email.clone(),
        });
    }
    rows.push(InfoRow {
        label: "ObjectId",
        value: user.object_id.clone(),
    });
    rows
}
