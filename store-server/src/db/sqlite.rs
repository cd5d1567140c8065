//! SQLite-backed KV store
//!
//! 单表 `kv_store(key TEXT PRIMARY KEY, value TEXT)`，值为 JSON 文本。
//! 连接配置沿用 WAL + busy_timeout，写冲突等待 5s 而非立即失败。

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use super::{KvError, KvResult, KvStore};

/// SQLite KV 存储 — 持有连接池
#[derive(Clone)]
pub struct SqliteKv {
    pub pool: SqlitePool,
}

impl SqliteKv {
    /// 打开数据库并执行迁移
    pub async fn new(db_path: &str) -> KvResult<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| KvError::Database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| KvError::Database(format!("Failed to open database: {e}")))?;

        // busy_timeout: 写冲突时等待 5s 而非立即失败
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| KvError::Database(format!("Failed to set busy_timeout: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&pool)
            .await
            .map_err(|e| KvError::Database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }
}

/// LIKE 模式转义：`\` `%` `_` 前加 `\`
fn escape_like(prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[async_trait]
impl KvStore for SqliteKv {
    async fn get(&self, key: &str) -> KvResult<Option<Value>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((text,)) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value) -> KvResult<()> {
        let text = serde_json::to_string(&value)?;
        sqlx::query(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> KvResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> KvResult<Vec<Value>> {
        let pattern = format!("{}%", escape_like(prefix));
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT value FROM kv_store WHERE key LIKE ?1 ESCAPE '\\' ORDER BY key",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(text,)| serde_json::from_str(&text).map_err(KvError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("cart:user_1"), "cart:user\\_1");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("plain:prefix:"), "plain:prefix:");
    }

    #[tokio::test]
    async fn test_sqlite_roundtrip_and_prefix() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kv.db");
        let kv = SqliteKv::new(&path.to_string_lossy()).await.expect("open");

        kv.set("user:1", serde_json::json!({"id": "1"}))
            .await
            .expect("set");
        kv.set("user:2", serde_json::json!({"id": "2"}))
            .await
            .expect("set");
        kv.set("product:1", serde_json::json!({"id": "p1"}))
            .await
            .expect("set");

        let got = kv.get("user:1").await.expect("get");
        assert_eq!(got, Some(serde_json::json!({"id": "1"})));

        let users = kv.get_by_prefix("user:").await.expect("scan");
        assert_eq!(users.len(), 2);

        kv.del("user:2").await.expect("del");
        let users = kv.get_by_prefix("user:").await.expect("scan");
        assert_eq!(users.len(), 1);

        // overwrite is atomic per key
        kv.set("user:1", serde_json::json!({"id": "1", "name": "a"}))
            .await
            .expect("set");
        let got: Option<Value> = kv.get("user:1").await.expect("get");
        assert_eq!(got.unwrap()["name"], "a");
    }
}
