//! Adapters for external clients.

mod reqwest_map_session;

pub use reqwest_map_session::ReqwestMapSession;
