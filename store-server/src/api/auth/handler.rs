//! Authentication Handlers
//!
//! 注册 / 登录 / 当前用户查询

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use chrono::Utc;
use shared::models::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User, UserResponse,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::users;
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/register - 注册新用户
///
/// 创建身份凭据和用户记录。邮箱重复返回 409。
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;

    let user_id = state.identity.register(&req.email, &req.password).await?;

    let user = User {
        id: user_id.clone(),
        email: req.email.clone(),
        name: req.name,
        role: req.role,
        created_at: Utc::now(),
        profile_photo: None,
        updated_at: None,
    };
    users::put(&state.kv, &user).await?;

    security_log!(
        "INFO",
        "user_registered",
        user_id = user_id.clone(),
        role = user.role.to_string()
    );

    Ok(Json(RegisterResponse {
        success: true,
        user_id,
        message: "User registered successfully".to_string(),
    }))
}

/// POST /api/auth/login - 登录
///
/// 校验凭据并签发 bearer 令牌。
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let result = state.identity.login(&req.email, &req.password).await;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let (access_token, user_id) = match result {
        Ok(ok) => ok,
        Err(e) => {
            security_log!("WARN", "login_failed", email = req.email.clone());
            return Err(e.into());
        }
    };

    // 凭据有效但用户记录缺失属于数据不一致，按内部错误处理
    let user = users::find_by_id(&state.kv, &user_id)
        .await?
        .ok_or_else(|| AppError::internal(format!("User record missing for {user_id}")))?;

    security_log!("INFO", "login_success", user_id = user_id.clone());

    Ok(Json(LoginResponse {
        success: true,
        access_token,
        user,
    }))
}

/// GET /api/auth/user - 当前用户记录
pub async fn current_user(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = users::find_by_id(&state.kv, &current.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", current.id)))?;

    Ok(Json(UserResponse {
        success: false,
        user,
    }))
}
