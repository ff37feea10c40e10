//! Domain layer: the `User` entity and the storage contract it lives behind.

pub mod store;
pub mod user;

pub use store::{EntityId, Identifiable, Store};
pub use user::User;

// Re-export error types from shared for convenience
pub use crate::shared::{DomainError, DomainResult};
