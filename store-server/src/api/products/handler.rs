//! Product API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Utc;
use shared::models::{
    Ack, ProductCreate, ProductListResponse, ProductResponse, ProductUpdate,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::catalog;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ProductListResponse>> {
    let products = catalog::list(&state.kv).await?;
    Ok(Json(ProductListResponse { products }))
}

/// GET /api/products/{id} - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let product = catalog::find_by_id(&state.kv, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;

    Ok(Json(ProductResponse {
        success: false,
        product,
    }))
}

/// POST /api/products - 创建商品 (member/owner)
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ProductResponse>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_NAME_LEN)?;
    validate_price(payload.price, "price")?;
    if payload.description.len() > MAX_DESCRIPTION_LEN {
        return Err(AppError::validation("description is too long"));
    }
    validate_optional_text(&payload.image_url, "imageUrl", MAX_URL_LEN)?;

    let product = catalog::create(&state.kv, payload, &current.id, Utc::now()).await?;
    tracing::info!(product_id = %product.id, created_by = %current.id, "Product created");

    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

/// PUT /api/products/{id} - 合并更新商品 (member/owner)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductResponse>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_optional_text(&payload.image_url, "imageUrl", MAX_URL_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }

    let product = catalog::update(&state.kv, &id, payload, Utc::now()).await?;
    tracing::info!(product_id = %id, "Product updated");

    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

/// DELETE /api/products/{id} - 删除商品 (owner)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Ack>> {
    catalog::delete(&state.kv, &id).await?;
    tracing::info!(product_id = %id, deleted_by = %current.id, "Product deleted");

    Ok(Json(Ack::ok()))
}
