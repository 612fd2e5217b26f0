//! Product and favorite handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::{AuthenticatedUser, OptionalUser};
use crate::models::{
    CreateProductRequest, Product, ProductListQuery, ProductWithSeller, UpdateProductRequest,
};
use crate::services::ProductService;

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<ProductWithSeller>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product: ProductWithSeller,
}

#[derive(Debug, Serialize)]
pub struct ProductMutationResponse {
    pub success: bool,
    pub message: String,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub success: bool,
    pub favorited: bool,
    pub message: String,
}

/// GET /api/products
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    viewer: OptionalUser,
    ApiQuery(query): ApiQuery<ProductListQuery>,
) -> ApiResult<Json<ProductListResponse>> {
    let products = service.list_products(query, viewer.user_id()).await?;

    Ok(Json(ProductListResponse {
        success: true,
        products,
    }))
}

/// GET /api/products/:id
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    viewer: OptionalUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ProductResponse>> {
    let product = service.get_product(id, viewer.user_id()).await?;

    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

/// POST /api/products
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    user: AuthenticatedUser,
    ApiJson(request): ApiJson<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductMutationResponse>)> {
    let product = service.create_product(user.user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductMutationResponse {
            success: true,
            message: "Product created successfully".to_string(),
            product,
        }),
    ))
}

/// PUT /api/products/:id
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateProductRequest>,
) -> ApiResult<Json<ProductMutationResponse>> {
    let product = service.update_product(id, user.user_id, request).await?;

    Ok(Json(ProductMutationResponse {
        success: true,
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    service.delete_product(id, user.user_id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Product deleted successfully".to_string(),
    }))
}

/// POST /api/products/:id/favorite
pub async fn toggle_favorite(
    State(service): State<Arc<ProductService>>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<FavoriteResponse>> {
    let favorited = service.toggle_favorite(user.user_id, id).await?;

    let message = if favorited {
        "Added to favorites"
    } else {
        "Removed from favorites"
    };

    Ok(Json(FavoriteResponse {
        success: true,
        favorited,
        message: message.to_string(),
    }))
}

/// GET /api/favorites
pub async fn list_favorites(
    State(service): State<Arc<ProductService>>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ProductListResponse>> {
    let products = service.list_favorites(user.user_id).await?;

    Ok(Json(ProductListResponse {
        success: true,
        products,
    }))
}
