//! Review and report handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::AuthenticatedUser;
use crate::models::{CreateReportRequest, CreateReviewRequest, Report, Review, ReviewListQuery};
use crate::services::{ReportService, ReviewService, SellerReviews};

#[derive(Debug, Serialize)]
pub struct ReviewCreatedResponse {
    pub success: bool,
    pub message: String,
    pub review: Review,
}

#[derive(Debug, Serialize)]
pub struct SellerReviewsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub page: SellerReviews,
}

#[derive(Debug, Serialize)]
pub struct ReportCreatedResponse {
    pub success: bool,
    pub message: String,
    pub report: Report,
}

/// POST /api/reviews
pub async fn submit_review(
    State(service): State<Arc<ReviewService>>,
    user: AuthenticatedUser,
    ApiJson(request): ApiJson<CreateReviewRequest>,
) -> ApiResult<(StatusCode, Json<ReviewCreatedResponse>)> {
    let review = service.submit_review(user.user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreatedResponse {
            success: true,
            message: "Review submitted successfully".to_string(),
            review,
        }),
    ))
}

/// GET /api/reviews/seller/:sellerId
pub async fn seller_reviews(
    State(service): State<Arc<ReviewService>>,
    ApiPath(seller_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ReviewListQuery>,
) -> ApiResult<Json<SellerReviewsResponse>> {
    let page = service.seller_reviews(seller_id, query).await?;

    Ok(Json(SellerReviewsResponse {
        success: true,
        page,
    }))
}

/// POST /api/reviews/report
pub async fn submit_report(
    State(service): State<Arc<ReportService>>,
    user: AuthenticatedUser,
    ApiJson(request): ApiJson<CreateReportRequest>,
) -> ApiResult<(StatusCode, Json<ReportCreatedResponse>)> {
    let report = service.submit_report(user.user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReportCreatedResponse {
            success: true,
            message: "Report submitted successfully. Our moderators will review it.".to_string(),
            report,
        }),
    ))
}
