//! Data models for the marketplace backend

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod product;
pub mod report;
pub mod review;
pub mod user;

pub use product::*;
pub use report::*;
pub use review::*;
pub use user::*;

/// Returned by `FromStr` on the closed enumerations when the input is not a member
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);

/// A numeric field that clients send either as a JSON number or as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

impl NumericInput {
    /// Coerce to a decimal; `None` if the value is not numeric
    pub fn to_decimal(&self) -> Option<Decimal> {
        let text = match self {
            NumericInput::Number(n) => n.to_string(),
            NumericInput::Text(s) => s.trim().to_string(),
        };
        if text.is_empty() {
            return None;
        }
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    /// Coerce to a whole number; `None` if fractional or not numeric
    pub fn to_integer(&self) -> Option<i64> {
        let value = self.to_decimal()?;
        if value.fract().is_zero() {
            i64::try_from(value).ok()
        } else {
            None
        }
    }

    /// True for `""` and whitespace, which forms submit for untouched inputs
    pub fn is_blank(&self) -> bool {
        matches!(self, NumericInput::Text(s) if s.trim().is_empty())
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value.into())
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Treat `Some("")` and `Some("   ")` as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
