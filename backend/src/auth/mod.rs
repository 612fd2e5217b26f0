//! Authentication for the marketplace
//!
//! - Telegram Mini App init data validation
//! - JWT bearer token generation and validation
//! - Token to user resolution for the auth guard

mod jwt;
mod service;
mod telegram;

pub use jwt::{generate_token, user_id_from_claims, verify_token, Claims, JwtError};
pub use service::{AuthService, AuthSettings};
pub use telegram::{sign_init_data, verify_init_data, InitData, InitDataError, TelegramUser};
