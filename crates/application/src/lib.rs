//! Tessera Application - Use cases and ports
//!
//! This crate holds the authentication orchestration: the ports the
//! infrastructure implements, the use case the presentation layer calls, and
//! map credential provisioning.

pub mod auth;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use auth::{AcquisitionStrategy, MapTokenProvisioner, ProvisionOutcome};
pub use error::{ProvisioningError, ProvisioningResult};
pub use ports::{AccountRepository, IdentityProvider, MapSessionSink, MapSinkError};
pub use use_cases::{AuthenticationUseCase, DefaultAuthenticationUseCase};
