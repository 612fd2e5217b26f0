//! User profile and health handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::auth::UserResponse;
use crate::error::ApiResult;
use crate::extract::ApiPath;
use crate::services::UserService;

/// GET /api/users/:id - Public seller profile
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = service.profile(id).await?;

    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// GET /health
pub async fn health_check(State(service): State<Arc<UserService>>) -> Json<HealthResponse> {
    let db_status = match service.store_status().await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let status = if db_status == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: db_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
