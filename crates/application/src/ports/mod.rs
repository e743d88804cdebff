//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod account_repository;
mod identity_provider;
mod map_session;

pub use account_repository::AccountRepository;
pub use identity_provider::IdentityProvider;
pub use map_session::{MapSessionSink, MapSinkError};
