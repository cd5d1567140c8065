//! 文件存储服务
//!
//! 头像文件落在 `work_dir/profiles/{userId}/{fileName}`，
//! 对外通过 `/api/profiles/{userId}/{fileName}` 读取。

use std::path::PathBuf;

use crate::utils::AppError;

/// 本地文件存储
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

/// 文件名安全检查：拒绝空名和路径穿越
fn validate_file_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(AppError::validation("Invalid file name"));
    }
    Ok(())
}

impl FileStorage {
    /// `root` 为 profiles 目录 (work_dir/profiles)
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// 保存文件，返回对外可访问的 URL 路径
    pub async fn save_profile_photo(
        &self,
        user_id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        validate_file_name(file_name)?;
        validate_file_name(user_id)?;

        let dir = self.root.join(user_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create profile dir: {e}")))?;

        let path = dir.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to write file: {e}")))?;

        tracing::info!(user_id = %user_id, file = %file_name, size = bytes.len(), "Profile photo stored");
        Ok(format!("/api/profiles/{user_id}/{file_name}"))
    }

    /// 读取文件，不存在返回 None
    pub async fn read_profile_photo(
        &self,
        user_id: &str,
        file_name: &str,
    ) -> Result<Option<Vec<u8>>, AppError> {
        validate_file_name(file_name)?;
        validate_file_name(user_id)?;

        let path = self.root.join(user_id).join(file_name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::internal(format!("Failed to read file: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_read_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().to_path_buf());

        let url = storage
            .save_profile_photo("u1", "avatar.png", b"png-bytes")
            .await
            .unwrap();
        assert_eq!(url, "/api/profiles/u1/avatar.png");

        let bytes = storage.read_profile_photo("u1", "avatar.png").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(b"png-bytes".as_slice()));

        let missing = storage.read_profile_photo("u1", "other.png").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().to_path_buf());

        assert!(
            storage
                .save_profile_photo("u1", "../escape.png", b"x")
                .await
                .is_err()
        );
        assert!(storage.read_profile_photo("..", "a.png").await.is_err());
    }
}
