//! Cart API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Utc;
use shared::models::{Ack, CartAdd, CartResponse};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::cart;
use crate::utils::{AppError, AppResult};

/// GET /api/cart - 读取当前用户的购物车
pub async fn get_cart(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<CartResponse>> {
    let cart = cart::get(&state.kv, &current.id).await?;
    Ok(Json(CartResponse {
        success: false,
        cart,
    }))
}

/// POST /api/cart - 添加商品
///
/// 数量必须 ≥ 1；不校验库存 (结账为外部流程)。
pub async fn add_item(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<CartAdd>,
) -> AppResult<Json<CartResponse>> {
    if payload.product_id.is_empty() {
        return Err(AppError::validation("productId is required"));
    }
    if payload.quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1"));
    }

    let cart = cart::add(
        &state.kv,
        &current.id,
        &payload.product_id,
        payload.quantity,
        Utc::now(),
    )
    .await?;

    Ok(Json(CartResponse {
        success: true,
        cart,
    }))
}

/// DELETE /api/cart/{productId} - 移除商品 (不在车中时幂等成功)
pub async fn remove_item(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(product_id): Path<String>,
) -> AppResult<Json<CartResponse>> {
    let cart = cart::remove(&state.kv, &current.id, &product_id).await?;
    Ok(Json(CartResponse {
        success: true,
        cart,
    }))
}

/// DELETE /api/cart - 清空购物车
pub async fn clear(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Ack>> {
    cart::clear(&state.kv, &current.id).await?;
    Ok(Json(Ack::ok()))
}
