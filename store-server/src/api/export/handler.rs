//! Export API Handlers

use axum::{Json, extract::State};
use base64::Engine;
use shared::models::ExportResponse;

use crate::core::ServerState;
use crate::db::repository::users;
use crate::services::export::users_workbook;
use crate::utils::AppResult;

/// GET /api/export/users - 导出用户清单 (owner)
///
/// 返回 `{success, fileName, data}`，data 为 xlsx 字节的 base64。
pub async fn export_users(State(state): State<ServerState>) -> AppResult<Json<ExportResponse>> {
    let users = users::list_all(&state.kv).await?;
    let bytes = users_workbook(&users)?;

    tracing::info!(count = users.len(), "User export generated");

    Ok(Json(ExportResponse {
        success: true,
        file_name: "users.xlsx".to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
    }))
}
