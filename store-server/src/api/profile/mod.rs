//! Profile API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/profile | PUT | 更新本人资料 (白名单字段) | bearer |
//! | /api/profile/photo | POST | 上传头像 (base64 data URL) | bearer |
//! | /api/profiles/{userId}/{fileName} | GET | 读取头像文件 | 无 |

mod handler;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post, put},
};
use http::header;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/profile", put(handler::update_profile))
        .route("/api/profile/photo", post(handler::upload_photo))
        // 头像读取 - 公共路由
        .route(
            "/api/profiles/{user_id}/{file_name}",
            get(serve_profile_photo),
        )
}

/// 头像文件响应
enum ProfileFileResponse {
    Ok(Bytes, String),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for ProfileFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            ProfileFileResponse::Ok(content, content_type) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            ProfileFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            ProfileFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// GET /api/profiles/{userId}/{fileName} - 读取头像文件
///
/// Content-Type 由文件扩展名推断。
async fn serve_profile_photo(
    State(state): State<ServerState>,
    Path((user_id, file_name)): Path<(String, String)>,
) -> ProfileFileResponse {
    match state.storage.read_profile_photo(&user_id, &file_name).await {
        Ok(Some(content)) => {
            let content_type = mime_guess::from_path(&file_name)
                .first_or_octet_stream()
                .to_string();
            ProfileFileResponse::Ok(content.into(), content_type)
        }
        Ok(None) => ProfileFileResponse::NotFound,
        Err(_) => ProfileFileResponse::BadRequest("Invalid file name"),
    }
}
