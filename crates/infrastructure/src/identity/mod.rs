//! Account repositories.

mod account_repository;
mod failing;

pub use account_repository::IdentityAccountRepository;
pub use failing::FailingAccountRepository;
