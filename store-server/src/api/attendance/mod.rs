//! Attendance API 模块
//!
//! | 路径 | 方法 | 说明 | 角色 |
//! |------|------|------|------|
//! | /api/attendance/clock-in | POST | 上班打卡 | employee |
//! | /api/attendance/clock-out | POST | 下班打卡 | employee |
//! | /api/attendance | GET | 考勤记录 (owner 全量，其余本人) | bearer |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/attendance", attendance_routes())
}

fn attendance_routes() -> Router<ServerState> {
    let clock = Router::new()
        .route("/clock-in", post(handler::clock_in))
        .route("/clock-out", post(handler::clock_out))
        .route_layer(middleware::from_fn(require_role(&[Role::Employee])));

    // 读取对所有认证用户开放，范围在 handler 内按角色收窄
    let read = Router::new().route("/", get(handler::records));

    clock.merge(read)
}
