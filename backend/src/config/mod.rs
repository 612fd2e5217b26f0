//! Configuration management for the marketplace server
//!
//! This module handles loading and validating configuration from environment variables,
//! with support for different environments (development, staging, production).

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

use crate::auth::AuthSettings;

/// Secret used when `JWT_SECRET` is unset outside production
const DEV_JWT_SECRET: &str = "development-secret-change-in-production";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Application environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Which store implementation backs the API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local tables, for demos and local UI work
    Memory,
}

impl StoreBackend {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid store backend: '{}'. Expected: postgres or memory",
                s
            ))),
        }
    }
}

/// Options for assembling the HTTP router
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Comma-separated list of allowed CORS origins; permissive when unset
    pub cors_allowed_origins: Option<String>,
    /// Directory with the Mini App front-end, served as a fallback
    pub static_dir: Option<PathBuf>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    pub store_backend: StoreBackend,

    /// Current environment
    pub environment: Environment,

    pub bind_address: IpAddr,

    /// Server port
    pub port: u16,

    /// Maximum database connections
    pub db_max_connections: u32,

    /// Apply pending migrations at startup
    pub run_migrations: bool,

    /// CORS allowed origins
    pub cors_allowed_origins: Option<String>,

    pub static_dir: Option<PathBuf>,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// JWT secret for token signing
    pub jwt_secret: String,

    /// Token TTL in seconds (default: 604800 = 7 days)
    pub jwt_ttl_seconds: i64,

    /// Bot token used to validate Mini App init data
    pub telegram_bot_token: Option<String>,

    /// Maximum accepted age of init data (default: 86400 = 1 day)
    pub telegram_auth_max_age_seconds: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .map(|s| Environment::parse(&s))
            .unwrap_or(Ok(Environment::Development))?;

        let store_backend = env::var("STORE_BACKEND")
            .map(|s| StoreBackend::parse(&s))
            .unwrap_or(Ok(StoreBackend::Postgres))?;

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) if store_backend == StoreBackend::Memory => String::new(),
            Err(_) => return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string())),
        };

        let bind_address = env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidValue("BIND_ADDRESS must be an IP address".to_string()))?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .unwrap_or(5);

        let run_migrations = env::var("RUN_MIGRATIONS")
            .map(|s| parse_flag(&s))
            .unwrap_or(true);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let static_dir = env::var("STATIC_DIR").ok().map(PathBuf::from);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if environment.is_production() => {
                return Err(ConfigError::MissingEnvVar("JWT_SECRET".to_string()))
            }
            Err(_) => DEV_JWT_SECRET.to_string(),
        };

        let jwt_ttl_seconds = env::var("JWT_TTL_SECONDS")
            .unwrap_or_else(|_| "604800".to_string())
            .parse::<i64>()
            .unwrap_or(604_800);

        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let telegram_auth_max_age_seconds = env::var("TELEGRAM_AUTH_MAX_AGE_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<i64>()
            .unwrap_or(86_400);

        Ok(Config {
            database_url,
            store_backend,
            environment,
            bind_address,
            port,
            db_max_connections,
            run_migrations,
            cors_allowed_origins,
            static_dir,
            log_level,
            jwt_secret,
            jwt_ttl_seconds,
            telegram_bot_token,
            telegram_auth_max_age_seconds,
        })
    }

    /// Get database URL with the password masked, for logging
    pub fn database_url_masked(&self) -> String {
        let url = &self.database_url;
        let credentials_start = url.find("://").map(|pos| pos + 3).unwrap_or(0);
        if let Some(at_pos) = url.rfind('@') {
            if at_pos > credentials_start {
                if let Some(colon_pos) = url[credentials_start..at_pos].find(':') {
                    let password_start = credentials_start + colon_pos + 1;
                    return format!("{}****{}", &url[..password_start], &url[at_pos..]);
                }
            }
        }
        url.clone()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            jwt_secret: self.jwt_secret.clone(),
            jwt_ttl_seconds: self.jwt_ttl_seconds,
            telegram_bot_token: self.telegram_bot_token.clone(),
            telegram_auth_max_age_seconds: self.telegram_auth_max_age_seconds,
        }
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            cors_allowed_origins: self.cors_allowed_origins.clone(),
            static_dir: self.static_dir.clone(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
