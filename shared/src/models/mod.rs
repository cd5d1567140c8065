//! Data Models
//!
//! 按资源划分的模型模块，每个模块包含实体和对应的请求/响应 DTO。

pub mod attendance;
pub mod cart;
pub mod product;
pub mod user;

pub use attendance::{AttendanceListResponse, AttendanceRecord, AttendanceResponse};
pub use cart::{Cart, CartAdd, CartItem, CartResponse};
pub use product::{
    Product, ProductCreate, ProductListResponse, ProductResponse, ProductUpdate,
};
pub use user::{
    ExportResponse, LoginRequest, LoginResponse, PhotoUpload, PhotoUploadResponse, ProfileUpdate,
    RegisterRequest, RegisterResponse, Role, User, UserListResponse, UserResponse,
};

use serde::{Deserialize, Serialize};

/// 通用确认响应 `{ success, message? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}
