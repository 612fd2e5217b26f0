//! Die-cast marketplace backend library
//!
//! REST API for a Telegram Mini App where collectors list, favorite and
//! review die-cast models. The binary in `main.rs` wires these modules to a
//! store and a listener; tests drive [`routes::build_router`] directly.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use config::Config;
pub use routes::build_router;
pub use state::AppState;
