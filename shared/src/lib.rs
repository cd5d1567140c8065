//! Shared types for the storefront server
//!
//! 前后端共享的数据模型和 API DTO。
//! 所有 JSON 字段统一使用 camelCase (客户端约定)。

pub mod models;

pub use models::{
    AttendanceRecord, Cart, CartItem, Product, ProductCreate, ProductUpdate, Role, User,
};
