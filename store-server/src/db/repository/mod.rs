//! Repository Module
//!
//! 基于 KV 存储的领域数据访问层。函数接收 [`Kv`] 引用，
//! 键的拼装统一在 [`keys`] 中，避免散落的字符串模板。

pub mod attendance;
pub mod cart;
pub mod catalog;
pub mod users;

use thiserror::Error;

use crate::db::KvError;
use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<KvError> for RepoError {
    fn from(err: KvError) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// Key Convention: 冒号分隔的命名空间路径
// =============================================================================

/// KV 键拼装
pub mod keys {
    use chrono::NaiveDate;

    pub const USER_PREFIX: &str = "user:";
    pub const PRODUCT_PREFIX: &str = "product:";
    pub const ATTENDANCE_PREFIX: &str = "attendance:";

    pub fn user(id: &str) -> String {
        format!("user:{id}")
    }

    /// 本地身份凭据 (邮箱 → id + 密码哈希)，与 `user:` 前缀隔离，
    /// 保证用户列表扫描不会混入凭据记录
    pub fn identity_email(email: &str) -> String {
        format!("identity:email:{email}")
    }

    pub fn product(id: &str) -> String {
        format!("product:{id}")
    }

    pub fn cart(user_id: &str) -> String {
        format!("cart:{user_id}")
    }

    pub fn attendance(user_id: &str, date: NaiveDate) -> String {
        format!("attendance:{user_id}:{date}")
    }

    /// 单个用户的考勤前缀 (非 owner 的读取范围)
    pub fn attendance_user_prefix(user_id: &str) -> String {
        format!("attendance:{user_id}:")
    }
}
