//! Application layer: use cases built on the domain store contract.

pub mod identity;
pub mod seeding;

pub use identity::{
    CredentialVerifier, IdentityService, LoginResult, PlaintextCredentialVerifier, UserSummary,
};
pub use seeding::{DataSeeder, UserSeeder};
