//! Database Module — Key-Value Store Adapter
//!
//! 对外提供命名空间化的键值存储抽象 [`KvStore`]：
//! `get` / `set` / `del` / `get_by_prefix`，按键原子读写，无跨键事务。
//!
//! 两个实现：
//! - [`SqliteKv`] - sqlx + SQLite (WAL)，生产使用
//! - [`MemoryKv`] - 进程内 BTreeMap，测试替身
//!
//! 上层通过 [`Kv`] 包装器使用带类型的读写接口，存储本体只关心
//! `serde_json::Value`。

pub mod memory;
pub mod repository;
pub mod sqlite;

pub use memory::MemoryKv;
pub use sqlite::SqliteKv;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// KV 存储错误
#[derive(Debug, Error)]
pub enum KvError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for KvError {
    fn from(err: sqlx::Error) -> Self {
        KvError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for KvError {
    fn from(err: serde_json::Error) -> Self {
        KvError::Serialization(err.to_string())
    }
}

/// Result type for KV operations
pub type KvResult<T> = Result<T, KvError>;

/// 键值存储接口
///
/// 按键原子 get/set/del，前缀扫描返回命中的全部值 (按键序)。
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> KvResult<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> KvResult<()>;
    async fn del(&self, key: &str) -> KvResult<()>;
    async fn get_by_prefix(&self, prefix: &str) -> KvResult<Vec<Value>>;
}

/// 带类型的 KV 访问包装器
///
/// 持有 `Arc<dyn KvStore>`，浅拷贝成本极低；序列化/反序列化在此完成。
#[derive(Clone)]
pub struct Kv {
    store: Arc<dyn KvStore>,
}

impl Kv {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// 读取并反序列化一个键，不存在返回 None
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> KvResult<Option<T>> {
        match self.store.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// 序列化并写入一个键 (整值覆盖)
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> KvResult<()> {
        let value = serde_json::to_value(value)?;
        self.store.set(key, value).await
    }

    /// 删除一个键 (键不存在时也视为成功)
    pub async fn del(&self, key: &str) -> KvResult<()> {
        self.store.del(key).await
    }

    /// 前缀扫描并反序列化全部命中值
    pub async fn get_by_prefix<T: DeserializeOwned>(&self, prefix: &str) -> KvResult<Vec<T>> {
        let values = self.store.get_by_prefix(prefix).await?;
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(KvError::from))
            .collect()
    }
}

impl std::fmt::Debug for Kv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kv").finish_non_exhaustive()
    }
}
