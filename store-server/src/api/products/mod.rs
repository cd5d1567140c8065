//! Product API 模块
//!
//! | 路径 | 方法 | 说明 | 角色 |
//! |------|------|------|------|
//! | /api/products | GET | 商品列表 | 公共 |
//! | /api/products/{id} | GET | 单个商品 | 公共 |
//! | /api/products | POST | 创建商品 | member/owner |
//! | /api/products/{id} | PUT | 合并更新商品 | member/owner |
//! | /api/products/{id} | DELETE | 删除商品 | owner |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    // 读取路由公共开放 (认证中间件按路径放行)
    let public = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .route_layer(middleware::from_fn(require_role(&[
            Role::Member,
            Role::Owner,
        ])));

    let owner_only = Router::new()
        .route("/{id}", delete(handler::delete))
        .route_layer(middleware::from_fn(require_role(&[Role::Owner])));

    public.merge(manage).merge(owner_only)
}
