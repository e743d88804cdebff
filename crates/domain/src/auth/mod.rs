//! Identity-provider domain types

mod types;

pub use types::{
    AuthError, IdentityAccount, PresentationContext, Prompt, TokenResult, token_preview,
};
