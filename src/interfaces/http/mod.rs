//! HTTP interface: REST handlers, auth middleware and the router

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use modules::*;
pub use router::create_api_router;
