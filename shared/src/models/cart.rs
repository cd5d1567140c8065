//! Cart Model
//!
//! 每个用户一条购物车记录，整体作为单个键写入。
//! 不变量：每个 productId 至多一个条目 (添加时合并数量)。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cart entity — one per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// 空购物车 (读取时不存在则返回该值，不落库)
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// 查找指定商品条目的下标
    pub fn find_item(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product_id == product_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::empty()
    }
}

/// Cart line item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: i64,
    pub added_at: DateTime<Utc>,
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAdd {
    pub product_id: String,
    pub quantity: i64,
}

/// 购物车响应 `{ success?, cart }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
    pub cart: Cart,
}
