//! # User Directory Service
//!
//! Issues HS256 JWTs for a fixed set of seeded users and serves a
//! token-protected user listing over REST.
//!
//! ## Architecture
//!
//! - **domain**: the `User` entity and the generic `Store` contract
//! - **application**: credential verification, token issuance, seeding
//! - **infrastructure**: in-memory store and JWT signing
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: startup, tracing and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export API router
pub use interfaces::http::create_api_router;

pub use server::{build_identity, init_tracing, ServerHandle, ServerOptions};
