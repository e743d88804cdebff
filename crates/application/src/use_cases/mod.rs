//! Application use cases (business logic orchestration).

mod authentication;

pub use authentication::*;
