//! Infrastructure layer - external concerns

pub mod crypto;
pub mod storage;

pub use crypto::{JwtConfig, TokenIssuer};
pub use storage::InMemoryStore;
