//! Export API 模块
//!
//! | 路径 | 方法 | 说明 | 角色 |
//! |------|------|------|------|
//! | /api/export/users | GET | 用户清单 xlsx 导出 | owner |

mod handler;

use axum::{Router, middleware, routing::get};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/export/users", get(handler::export_users))
        .route_layer(middleware::from_fn(require_role(&[Role::Owner])))
}
