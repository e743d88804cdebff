//! Tessera UI - Presentation layer
//!
//! This crate owns the observable authentication state and the state machine
//! that drives it. Renderers subscribe to [`AuthStateStore`], project it with
//! [`AuthScreen`], and send [`UiCommand`]s back through the bridge loop.

pub mod bootstrap;
pub mod bridge;
pub mod state;
pub mod view;
pub mod view_model;

pub use bootstrap::{compose, compose_from_default_config};
pub use bridge::{UiCommand, dispatch, run_command_loop};
pub use state::AuthStateStore;
pub use view::{AlertDialog, AuthScreen, InfoRow, ScreenBody};
pub use view_model::AuthViewModel;
