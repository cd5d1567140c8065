//! 身份提供方
//!
//! 授权层只依赖 [`IdentityProvider`] 接口 (注册 / 登录 / 验证令牌)，
//! 不关心凭据如何存储。默认实现 [`LocalIdentityProvider`] 用 argon2
//! 哈希密码、签发 HS256 JWT，凭据记录保存在 `identity:email:{email}`
//! 键下，与用户记录的 `user:` 前缀隔离。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{JwtError, JwtService};
use crate::db::Kv;
use crate::db::repository::keys;
use crate::utils::AppError;

/// 验证通过的身份
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub email: String,
}

/// 身份提供方错误
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Identity provider error: {0}")]
    Provider(String),
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::DuplicateEmail => AppError::conflict("Email already registered"),
            IdentityError::InvalidCredentials => AppError::invalid_credentials(),
            IdentityError::TokenExpired => AppError::TokenExpired,
            IdentityError::InvalidToken => AppError::InvalidToken,
            IdentityError::Provider(msg) => AppError::internal(msg),
        }
    }
}

impl From<JwtError> for IdentityError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => IdentityError::TokenExpired,
            JwtError::GenerationFailed(msg) => IdentityError::Provider(msg),
            _ => IdentityError::InvalidToken,
        }
    }
}

/// 身份提供方接口
///
/// 作为显式依赖注入 [`crate::core::ServerState`]，测试中可以替换实现。
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 创建凭据，返回新用户 ID
    async fn register(&self, email: &str, password: &str) -> Result<String, IdentityError>;

    /// 校验凭据并签发 bearer 令牌，返回 (令牌, 用户 ID)
    async fn login(&self, email: &str, password: &str) -> Result<(String, String), IdentityError>;

    /// 验证 bearer 令牌
    async fn verify(&self, token: &str) -> Result<Identity, IdentityError>;
}

/// 凭据记录 (`identity:email:{email}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialRecord {
    id: String,
    email: String,
    password_hash: String,
}

impl CredentialRecord {
    /// Verify password using argon2
    fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

/// 本地身份提供方 — argon2 + JWT
pub struct LocalIdentityProvider {
    kv: Kv,
    jwt: JwtService,
}

impl LocalIdentityProvider {
    pub fn new(kv: Kv, jwt: JwtService) -> Self {
        Self { kv, jwt }
    }

    async fn find_credential(&self, email: &str) -> Result<Option<CredentialRecord>, IdentityError> {
        self.kv
            .get(&keys::identity_email(email))
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn register(&self, email: &str, password: &str) -> Result<String, IdentityError> {
        if self.find_credential(email).await?.is_some() {
            return Err(IdentityError::DuplicateEmail);
        }

        let record = CredentialRecord {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: CredentialRecord::hash_password(password)
                .map_err(|e| IdentityError::Provider(format!("Password hashing failed: {e}")))?,
        };

        self.kv
            .set(&keys::identity_email(email), &record)
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        Ok(record.id)
    }

    async fn login(&self, email: &str, password: &str) -> Result<(String, String), IdentityError> {
        // 未注册与密码错误返回同一错误，防止邮箱枚举
        let record = self
            .find_credential(email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let valid = record
            .verify_password(password)
            .map_err(|e| IdentityError::Provider(format!("Password verification failed: {e}")))?;
        if !valid {
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self.jwt.generate_token(&record.id, &record.email)?;
        Ok((token, record.id))
    }

    async fn verify(&self, token: &str) -> Result<Identity, IdentityError> {
        let claims = self.jwt.validate_token(token)?;
        Ok(Identity {
            id: claims.sub,
            email: claims.email,
        })
    }
}
