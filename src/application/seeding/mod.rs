//! Startup data seeding

mod users;

pub use users::{seed_users, UserSeeder};

use crate::domain::DomainResult;

/// Populates a store once at process start.
///
/// Errors are fatal: callers must abort startup instead of serving an
/// empty directory.
pub trait DataSeeder {
    /// Insert the seed records, returning how many were stored.
    fn seed(&self) -> DomainResult<usize>;
}
