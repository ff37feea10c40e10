//! Users module: protected user directory listing

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
