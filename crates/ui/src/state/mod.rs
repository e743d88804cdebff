//! Observable UI state.

mod auth_state;

pub use auth_state::AuthStateStore;
