//! Catalog Repository
//!
//! 商品列表直接由 `product:` 前缀扫描导出，不维护单独的 ID 索引键，
//! 因此创建/删除只有一次单键写入，不存在索引与记录不一致的窗口。

use chrono::{DateTime, Utc};
use shared::models::{Product, ProductCreate, ProductUpdate};
use uuid::Uuid;

use super::{RepoError, RepoResult, keys};
use crate::db::Kv;

pub async fn list(kv: &Kv) -> RepoResult<Vec<Product>> {
    Ok(kv.get_by_prefix(keys::PRODUCT_PREFIX).await?)
}

pub async fn find_by_id(kv: &Kv, id: &str) -> RepoResult<Option<Product>> {
    Ok(kv.get(&keys::product(id)).await?)
}

pub async fn create(
    kv: &Kv,
    data: ProductCreate,
    created_by: &str,
    now: DateTime<Utc>,
) -> RepoResult<Product> {
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: data.name,
        description: data.description,
        price: data.price,
        category: data.category,
        stock: data.stock,
        image_url: data.image_url,
        created_by: created_by.to_string(),
        created_at: now,
        updated_at: None,
    };

    kv.set(&keys::product(&product.id), &product).await?;
    Ok(product)
}

/// 字段级合并更新，缺省字段保持原值
pub async fn update(
    kv: &Kv,
    id: &str,
    data: ProductUpdate,
    now: DateTime<Utc>,
) -> RepoResult<Product> {
    let mut product = find_by_id(kv, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))?;

    if let Some(name) = data.name {
        product.name = name;
    }
    if let Some(description) = data.description {
        product.description = description;
    }
    if let Some(price) = data.price {
        product.price = price;
    }
    if let Some(category) = data.category {
        product.category = category;
    }
    if let Some(stock) = data.stock {
        product.stock = stock;
    }
    if let Some(image_url) = data.image_url {
        product.image_url = Some(image_url);
    }
    product.updated_at = Some(now);

    kv.set(&keys::product(id), &product).await?;
    Ok(product)
}

pub async fn delete(kv: &Kv, id: &str) -> RepoResult<()> {
    if find_by_id(kv, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    kv.del(&keys::product(id)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryKv;
    use std::sync::Arc;

    fn test_kv() -> Kv {
        Kv::new(Arc::new(MemoryKv::new()))
    }

    fn payload(name: &str) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            description: String::new(),
            price: 9.99,
            category: "general".to_string(),
            stock: 10,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_listing() {
        let kv = test_kv();
        let kept = create(&kv, payload("keep"), "owner-1", Utc::now())
            .await
            .unwrap();
        let doomed = create(&kv, payload("doom"), "owner-1", Utc::now())
            .await
            .unwrap();

        delete(&kv, &doomed.id).await.unwrap();

        assert!(find_by_id(&kv, &doomed.id).await.unwrap().is_none());
        let listed = list(&kv).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let kv = test_kv();
        let err = update(&kv, "nope", ProductUpdate::default(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
