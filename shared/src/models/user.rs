//! User Model
//!
//! 用户实体和认证相关 DTO。角色在注册时确定，之后不可通过资料更新修改。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户角色
///
/// | 角色 | 说明 |
/// |------|------|
/// | customer | 普通顾客 |
/// | employee | 店铺员工 (考勤打卡) |
/// | member | 会员 (可管理商品) |
/// | owner | 店主 (全部权限) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Employee,
    Member,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Employee => "employee",
            Role::Member => "member",
            Role::Owner => "owner",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 注册请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// 注册响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub user_id: String,
    pub message: String,
}

/// 登录请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub access_token: String,
    pub user: User,
}

/// 资料更新请求
///
/// 固定字段白名单：只允许修改 name 和 profilePhoto。
/// `deny_unknown_fields` 保证调用方无法通过该路径修改 role 等受保护字段。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

/// 单用户响应 `{ success?, user }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
    pub user: User,
}

/// 用户列表响应 `{ users }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

/// 头像上传请求：`imageData` 为 base64 data URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUpload {
    pub image_data: String,
    pub file_name: String,
}

/// 头像上传响应 `{ success, photoUrl }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadResponse {
    pub success: bool,
    pub photo_url: String,
}

/// 用户导出响应 `{ success, fileName, data }`，data 为 base64 的 xlsx
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    pub file_name: String,
    pub data: String,
}
