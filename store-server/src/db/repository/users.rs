//! User Repository

use chrono::{DateTime, Utc};
use shared::models::{ProfileUpdate, User};

use super::{RepoError, RepoResult, keys};
use crate::db::Kv;

pub async fn find_by_id(kv: &Kv, id: &str) -> RepoResult<Option<User>> {
    Ok(kv.get(&keys::user(id)).await?)
}

/// 写入用户记录 (整条覆盖)
pub async fn put(kv: &Kv, user: &User) -> RepoResult<()> {
    kv.set(&keys::user(&user.id), user).await?;
    Ok(())
}

pub async fn list_all(kv: &Kv) -> RepoResult<Vec<User>> {
    Ok(kv.get_by_prefix(keys::USER_PREFIX).await?)
}

/// 资料更新 — 白名单字段合并 (name / profilePhoto)，role 不可达
pub async fn update_profile(
    kv: &Kv,
    id: &str,
    updates: ProfileUpdate,
    now: DateTime<Utc>,
) -> RepoResult<User> {
    let mut user = find_by_id(kv, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;

    if let Some(name) = updates.name {
        user.name = name;
    }
    if let Some(photo) = updates.profile_photo {
        user.profile_photo = Some(photo);
    }
    user.updated_at = Some(now);

    put(kv, &user).await?;
    Ok(user)
}

/// 记录上传后的头像 URL
pub async fn set_profile_photo(
    kv: &Kv,
    id: &str,
    photo_url: &str,
    now: DateTime<Utc>,
) -> RepoResult<User> {
    let mut user = find_by_id(kv, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;
    user.profile_photo = Some(photo_url.to_string());
    user.updated_at = Some(now);
    put(kv, &user).await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryKv;
    use shared::models::Role;
    use std::sync::Arc;

    fn test_kv() -> Kv {
        Kv::new(Arc::new(MemoryKv::new()))
    }

    fn test_user(id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name: "Test".to_string(),
            role: Role::Customer,
            created_at: Utc::now(),
            profile_photo: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_profile_update_merges_allowed_fields_only() {
        let kv = test_kv();
        put(&kv, &test_user("u1")).await.unwrap();

        let updated = update_profile(
            &kv,
            "u1",
            ProfileUpdate {
                name: Some("New Name".to_string()),
                profile_photo: None,
            },
            Utc::now(),
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.role, Role::Customer);
        assert!(updated.updated_at.is_some());
        // 未提供的字段保持不变
        assert!(updated.profile_photo.is_none());
    }

    #[tokio::test]
    async fn test_list_all_excludes_identity_records() {
        let kv = test_kv();
        put(&kv, &test_user("u1")).await.unwrap();
        // 凭据记录位于 identity: 前缀下，不会出现在用户扫描中
        kv.set(
            &keys::identity_email("u1@example.com"),
            &serde_json::json!({"id": "u1", "passwordHash": "x"}),
        )
        .await
        .unwrap();

        let users = list_all(&kv).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "u1");
    }
}
