//! Credential models for OAuth 1.0a signing.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;
