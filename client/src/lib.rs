//! Client library for the die-cast marketplace API
//!
//! Mirrors the Mini App's browser controllers as typed services:
//! [`AuthManager`] owns the bearer session, [`ProductManager`] drives the
//! catalogue, and [`MarketApp`] wires both over one HTTP client.

pub mod api;
pub mod app;
pub mod auth;
pub mod card;
pub mod error;
pub mod labels;
pub mod models;
pub mod products;
pub mod session;

pub use api::{ApiClient, ClientConfig};
pub use app::MarketApp;
pub use auth::AuthManager;
pub use card::ProductCard;
pub use error::{ClientError, ClientResult};
pub use products::ProductManager;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
