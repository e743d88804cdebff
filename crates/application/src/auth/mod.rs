//! Authentication orchestration for the Tessera client.
//!
//! This module provides:
//! - Explicit token acquisition strategies (silent, interactive, fallback)
//! - Provisioning of map-tile credentials after sign-in

mod acquisition;
mod provisioning;

pub use acquisition::AcquisitionStrategy;
pub use provisioning::{MapTokenProvisioner, ProvisionOutcome};
