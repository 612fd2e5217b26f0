//! Middleware for the marketplace API
//!
//! Request tracing, security headers and the authentication extractors.

pub mod auth;
mod security;
mod trace;

pub use auth::{AuthenticatedUser, OptionalUser};
pub use security::security_headers;
pub use trace::request_tracing;
