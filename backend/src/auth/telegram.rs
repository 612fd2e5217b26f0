//! Telegram Mini App init data validation
//!
//! Telegram signs the query string it hands to a Mini App. The data-check
//! string is every `key=value` pair except `hash`, sorted by key and joined
//! with `\n`; the signing key is `HMAC_SHA256("WebAppData", bot_token)`.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use url::form_urlencoded;

use crate::models::TelegramProfile;

type HmacSha256 = Hmac<Sha256>;

const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InitDataError {
    #[error("Init data has no hash")]
    MissingHash,

    #[error("Init data signature mismatch")]
    SignatureMismatch,

    #[error("Init data has no valid auth_date")]
    MissingAuthDate,

    #[error("Init data is too old")]
    Expired,

    #[error("Init data has no user")]
    MissingUser,

    #[error("Init data user is malformed: {0}")]
    InvalidUser(String),
}

/// The `user` object embedded in init data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TelegramUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl From<TelegramUser> for TelegramProfile {
    fn from(user: TelegramUser) -> Self {
        TelegramProfile {
            telegram_id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            photo_url: user.photo_url,
        }
    }
}

/// Verified init data
#[derive(Debug, Clone)]
pub struct InitData {
    pub user: TelegramUser,
    pub auth_date: i64,
    pub query_id: Option<String>,
}

fn secret_key(bot_token: &str) -> Result<HmacSha256, InitDataError> {
    let mut secret =
        HmacSha256::new_from_slice(WEB_APP_DATA_KEY).map_err(|_| InitDataError::SignatureMismatch)?;
    secret.update(bot_token.as_bytes());
    let key = secret.finalize().into_bytes();
    HmacSha256::new_from_slice(&key).map_err(|_| InitDataError::SignatureMismatch)
}

fn data_check_string(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate raw init data and return the user it was issued for
///
/// `max_age_seconds <= 0` disables the freshness check.
pub fn verify_init_data(
    raw: &str,
    bot_token: &str,
    max_age_seconds: i64,
    now: i64,
) -> Result<InitData, InitDataError> {
    let mut fields: BTreeMap<String, String> = form_urlencoded::parse(raw.trim().as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let hash = fields.remove("hash").ok_or(InitDataError::MissingHash)?;
    let expected = hex::decode(&hash).map_err(|_| InitDataError::SignatureMismatch)?;

    let mut mac = secret_key(bot_token)?;
    mac.update(data_check_string(&fields).as_bytes());
    mac.verify_slice(&expected)
        .map_err(|_| InitDataError::SignatureMismatch)?;

    let auth_date = fields
        .get("auth_date")
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or(InitDataError::MissingAuthDate)?;

    if max_age_seconds > 0 && now - auth_date > max_age_seconds {
        return Err(InitDataError::Expired);
    }

    let user_json = fields.get("user").ok_or(InitDataError::MissingUser)?;
    let user: TelegramUser = serde_json::from_str(user_json)
        .map_err(|e| InitDataError::InvalidUser(e.to_string()))?;

    Ok(InitData {
        user,
        auth_date,
        query_id: fields.get("query_id").cloned(),
    })
}

/// Build a signed init data string, as Telegram would hand it to the Mini App
///
/// Useful for local development and tests; production init data always
/// comes from Telegram.
pub fn sign_init_data(fields: &[(&str, &str)], bot_token: &str) -> String {
    let sorted: BTreeMap<String, String> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let hash = match secret_key(bot_token) {
        Ok(mut mac) => {
            mac.update(data_check_string(&sorted).as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        Err(_) => String::new(),
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in &sorted {
        serializer.append_pair(k, v);
    }
    serializer.append_pair("hash", &hash);
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT_TOKEN: &str = "123456:TEST-bot-token";
    const USER: &str = r#"{"id":777,"first_name":"Alex","username":"alex_diecast"}"#;

    fn signed(auth_date: &str) -> String {
        sign_init_data(
            &[("auth_date", auth_date), ("query_id", "AAF"), ("user", USER)],
            BOT_TOKEN,
        )
    }

    #[test]
    fn test_valid_init_data() {
        let data = verify_init_data(&signed("1700000000"), BOT_TOKEN, 86_400, 1_700_000_100).unwrap();
        assert_eq!(data.user.id, 777);
        assert_eq!(data.user.username.as_deref(), Some("alex_diecast"));
        assert_eq!(data.query_id.as_deref(), Some("AAF"));
    }

    #[test]
    fn test_tampered_init_data() {
        let raw = signed("1700000000").replace("alex_diecast", "mallory");
        assert_eq!(
            verify_init_data(&raw, BOT_TOKEN, 86_400, 1_700_000_100).unwrap_err(),
            InitDataError::SignatureMismatch
        );
    }

    #[test]
    fn test_wrong_bot_token() {
        assert_eq!(
            verify_init_data(&signed("1700000000"), "other:token", 86_400, 1_700_000_100)
                .unwrap_err(),
            InitDataError::SignatureMismatch
        );
    }

    #[test]
    fn test_stale_init_data() {
        assert_eq!(
            verify_init_data(&signed("1700000000"), BOT_TOKEN, 60, 1_700_000_100).unwrap_err(),
            InitDataError::Expired
        );
        assert!(verify_init_data(&signed("1700000000"), BOT_TOKEN, 0, 1_800_000_000).is_ok());
    }

    #[test]
    fn test_missing_hash() {
        assert_eq!(
            verify_init_data("auth_date=1&user=%7B%7D", BOT_TOKEN, 0, 0).unwrap_err(),
            InitDataError::MissingHash
        );
    }
}
