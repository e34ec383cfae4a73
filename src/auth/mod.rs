//! Authentication module
//!
//! Supports: no auth, Bearer token
//!
//! The `Authenticator` applies the configured credential to every outgoing
//! request.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
