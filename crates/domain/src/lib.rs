//! Tessera Domain - Core authentication types
//!
//! This crate defines the domain model for the Tessera authentication client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod config;
pub mod error;
pub mod id;
pub mod map;
pub mod state;
pub mod user;

pub use auth::{
    AuthError, IdentityAccount, PresentationContext, Prompt, TokenResult, token_preview,
};
pub use config::AuthenticationConfig;
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use map::{AUTHORIZATION_HEADER, CLIENT_ID_HEADER, MapSessionConfig};
pub use state::{AlertKind, AuthAlert, AuthPhase, AuthState};
pub use user::AuthenticatedUser;
