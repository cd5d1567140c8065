//! Users API 模块
//!
//! | 路径 | 方法 | 说明 | 角色 |
//! |------|------|------|------|
//! | /api/users | GET | 用户列表 | owner/member |

mod handler;

use axum::{Router, middleware, routing::get};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/users", get(handler::list))
        .route_layer(middleware::from_fn(require_role(&[
            Role::Owner,
            Role::Member,
        ])))
}
