//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册 / 登录 / 当前用户
//! - [`products`] - 商品目录接口
//! - [`cart`] - 购物车接口
//! - [`profile`] - 个人资料和头像接口
//! - [`attendance`] - 考勤打卡接口
//! - [`users`] - 用户管理接口 (owner/member)
//! - [`export`] - 用户导出接口 (owner)

pub mod attendance;
pub mod auth;
pub mod cart;
pub mod export;
pub mod health;
pub mod products;
pub mod profile;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
