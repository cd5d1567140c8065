//! Services Module
//!
//! - [`identity`] - 身份提供方 (注册 / 登录 / 令牌验证)
//! - [`storage`] - 头像文件存储
//! - [`export`] - 用户清单 xlsx 导出

pub mod export;
pub mod identity;
pub mod storage;

pub use identity::{Identity, IdentityError, IdentityProvider, LocalIdentityProvider};
pub use storage::FileStorage;
