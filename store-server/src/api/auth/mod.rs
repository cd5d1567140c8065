//! Auth API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/auth/register | POST | 注册 | 无 |
//! | /api/auth/login | POST | 登录 | 无 |
//! | /api/auth/user | GET | 当前用户记录 | bearer |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", auth_routes())
}

fn auth_routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/user", get(handler::current_user))
}
