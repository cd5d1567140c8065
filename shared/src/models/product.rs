//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Update product payload (字段级合并，缺省字段保持不变)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub image_url: Option<String>,
}

/// 单商品响应 `{ success?, product }`
///
/// success 仅在写操作响应中出现 (为 false 时不序列化)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
    pub product: Product,
}

/// 商品列表响应 `{ products }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}
