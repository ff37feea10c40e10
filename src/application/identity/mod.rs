//! Identity module: credential verification, login and the user listing
//!
//! `IdentityService` is what HTTP handlers talk to; it combines the
//! `CredentialVerifier`, the `TokenIssuer` and the user store.

pub mod queries;
pub mod service;
pub mod verifier;

pub use queries::UserSummary;
pub use service::{IdentityService, LoginResult};
pub use verifier::{CredentialVerifier, PlaintextCredentialVerifier};
