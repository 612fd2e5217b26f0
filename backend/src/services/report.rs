//! Moderation reports

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::{non_blank, CreateReportRequest, NewReport, Report, ReportReason};
use crate::store::MarketStore;

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn MarketStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// File a report against a user, a product, or both
    pub async fn submit_report(
        &self,
        reporter_id: Uuid,
        req: CreateReportRequest,
    ) -> ApiResult<Report> {
        req.validate()?;

        let reason = non_blank(req.reason).ok_or_else(|| ApiError::validation("Reason is required"))?;
        let reason: ReportReason = reason
            .parse()
            .map_err(|_| ApiError::validation("Invalid reason"))?;

        if req.reported_user_id.is_none() && req.product_id.is_none() {
            return Err(ApiError::validation(
                "Either user or product must be specified",
            ));
        }

        if let Some(user_id) = req.reported_user_id {
            if self.store.find_user(user_id).await?.is_none() {
                return Err(ApiError::not_found("Reported user not found"));
            }
        }

        if let Some(product_id) = req.product_id {
            if self.store.product_owner(product_id).await?.is_none() {
                return Err(ApiError::not_found("Product not found"));
            }
        }

        let report = self
            .store
            .insert_report(&NewReport {
                reporter_id,
                reported_user_id: req.reported_user_id,
                product_id: req.product_id,
                reason,
                description: non_blank(req.description),
            })
            .await?;

        tracing::info!(
            report_id = %report.id,
            reporter_id = %reporter_id,
            reason = report.reason.as_str(),
            "Report submitted"
        );

        Ok(report)
    }
}
