//! Cart API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/cart | GET | 读取购物车 |
//! | /api/cart | POST | 添加商品 (同商品数量累加) |
//! | /api/cart/{productId} | DELETE | 移除商品 (幂等) |
//! | /api/cart | DELETE | 清空购物车 |
//!
//! 所有路由均要求 bearer 认证，购物车按当前用户隔离。

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::get_cart)
                .post(handler::add_item)
                .delete(handler::clear),
        )
        .route("/{product_id}", delete(handler::remove_item))
}
