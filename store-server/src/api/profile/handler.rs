//! Profile API Handlers

use axum::{Extension, Json, extract::State};
use base64::Engine;
use chrono::Utc;
use shared::models::{PhotoUpload, PhotoUploadResponse, ProfileUpdate, UserResponse};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::users;
use crate::utils::validation::{MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// 头像大小上限 (解码后 5MB)
const MAX_PHOTO_SIZE: usize = 5 * 1024 * 1024;

/// PUT /api/profile - 更新本人资料
///
/// 只接受 name / profilePhoto 两个字段；未知字段直接被请求体
/// 反序列化拒绝 (400)，role 等受保护字段无法通过此路径修改。
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<UserResponse>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.profile_photo, "profilePhoto", MAX_URL_LEN)?;
    if let Some(name) = &payload.name
        && name.trim().is_empty()
    {
        return Err(AppError::validation("name must not be empty"));
    }

    let user = users::update_profile(&state.kv, &current.id, payload, Utc::now()).await?;

    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// 解码 base64 头像数据
///
/// 接受带 `data:image/...;base64,` 前缀的 data URL，也接受裸 base64。
fn decode_image_data(image_data: &str) -> Result<Vec<u8>, AppError> {
    let encoded = match image_data.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => image_data,
    };

    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| AppError::validation(format!("Invalid base64 image data: {e}")))
}

/// POST /api/profile/photo - 上传头像
///
/// 请求体 `{imageData, fileName}`，imageData 为 base64 data URL。
/// 文件落盘后把 URL 写回用户记录的 profilePhoto 字段。
pub async fn upload_photo(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<PhotoUpload>,
) -> AppResult<Json<PhotoUploadResponse>> {
    if payload.file_name.is_empty() {
        return Err(AppError::validation("fileName is required"));
    }

    let bytes = decode_image_data(&payload.image_data)?;
    if bytes.is_empty() {
        return Err(AppError::validation("Empty image data"));
    }
    if bytes.len() > MAX_PHOTO_SIZE {
        return Err(AppError::validation(format!(
            "Image too large ({} bytes, max {MAX_PHOTO_SIZE})",
            bytes.len()
        )));
    }

    let photo_url = state
        .storage
        .save_profile_photo(&current.id, &payload.file_name, &bytes)
        .await?;

    users::set_profile_photo(&state.kv, &current.id, &photo_url, Utc::now()).await?;

    Ok(Json(PhotoUploadResponse {
        success: true,
        photo_url,
    }))
}
