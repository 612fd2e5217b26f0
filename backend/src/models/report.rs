//! Moderation reports

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::UnknownVariant;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Hash)]
#[sqlx(type_name = "report_reason", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Scam,
    FakeProduct,
    WrongDescription,
    BadBehavior,
    Spam,
    Other,
}

impl ReportReason {
    pub const ALL: [ReportReason; 6] = [
        ReportReason::Scam,
        ReportReason::FakeProduct,
        ReportReason::WrongDescription,
        ReportReason::BadBehavior,
        ReportReason::Spam,
        ReportReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Scam => "scam",
            ReportReason::FakeProduct => "fake_product",
            ReportReason::WrongDescription => "wrong_description",
            ReportReason::BadBehavior => "bad_behavior",
            ReportReason::Spam => "spam",
            ReportReason::Other => "other",
        }
    }
}

impl FromStr for ReportReason {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportReason::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Moderation state; new reports always start as `Pending`
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Default)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    Reviewed,
    Resolved,
    Rejected,
}

/// Report row
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub reported_user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub reason: ReportReason,
    pub description: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /reviews/report`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub reported_user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub reason: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub reporter_id: Uuid,
    pub reported_user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub reason: ReportReason,
    pub description: Option<String>,
}
