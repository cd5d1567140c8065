//! In-memory KV store
//!
//! 测试替身，也用于无持久化的本地运行。BTreeMap 保证前缀扫描按键序。

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::{KvResult, KvStore};

/// 进程内 KV 存储
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> KvResult<Option<Value>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> KvResult<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn del(&self, key: &str) -> KvResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> KvResult<Vec<Value>> {
        let entries = self.entries.read();
        let values = entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(_, v)| v.clone())
            .collect();
        Ok(values)
    }
}
