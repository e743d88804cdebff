//! Tessera Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod config;
pub mod identity;

pub use adapters::ReqwestMapSession;
pub use config::{
    CONFIG_PATH_ENV, ConfigError, DEFAULT_CONFIG_FILE, config_path, load_config,
    load_default_config, parse_config,
};
pub use identity::{FailingAccountRepository, IdentityAccountRepository};
