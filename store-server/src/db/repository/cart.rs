//! Cart Repository
//!
//! 购物车整体作为单键读写；add 是读-改-写的合并追加，
//! 同一商品只保留一个条目，数量累加。

use chrono::{DateTime, Utc};
use shared::models::{Cart, CartItem};

use super::{RepoResult, keys};
use crate::db::Kv;

/// 读取购物车；不存在返回空车，不落库
pub async fn get(kv: &Kv, user_id: &str) -> RepoResult<Cart> {
    Ok(kv.get(&keys::cart(user_id)).await?.unwrap_or_default())
}

/// 添加商品：已存在则数量累加，否则追加新条目
pub async fn add(
    kv: &Kv,
    user_id: &str,
    product_id: &str,
    quantity: i64,
    now: DateTime<Utc>,
) -> RepoResult<Cart> {
    let mut cart = get(kv, user_id).await?;

    match cart.find_item(product_id) {
        Some(idx) => cart.items[idx].quantity += quantity,
        None => cart.items.push(CartItem {
            product_id: product_id.to_string(),
            quantity,
            added_at: now,
        }),
    }

    kv.set(&keys::cart(user_id), &cart).await?;
    Ok(cart)
}

/// 移除商品；商品不在车中时为幂等成功
pub async fn remove(kv: &Kv, user_id: &str, product_id: &str) -> RepoResult<Cart> {
    let mut cart = get(kv, user_id).await?;
    cart.items.retain(|item| item.product_id != product_id);
    kv.set(&keys::cart(user_id), &cart).await?;
    Ok(cart)
}

/// 清空购物车
pub async fn clear(kv: &Kv, user_id: &str) -> RepoResult<()> {
    kv.set(&keys::cart(user_id), &Cart::empty()).await?;
    Ok(())
}
