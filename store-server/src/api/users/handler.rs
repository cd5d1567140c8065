//! Users API Handlers

use axum::{Json, extract::State};
use shared::models::UserListResponse;

use crate::core::ServerState;
use crate::db::repository::users;
use crate::utils::AppResult;

/// GET /api/users - 全量用户列表 (owner/member)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<UserListResponse>> {
    let users = users::list_all(&state.kv).await?;
    Ok(Json(UserListResponse { users }))
}
