/// Generic persistent key/value datastore
///
/// Pointer-record cache entries live here. The store only needs independent
/// per-key get/put; no transactions, no scans.
use crate::error::ProfileResult;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

/// Key/value datastore boundary
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Look up a value; `None` on a missing key
    async fn get(&self, key: &str) -> ProfileResult<Option<Vec<u8>>>;

    /// Store a value, replacing any existing one
    async fn put(&self, key: &str, value: &[u8]) -> ProfileResult<()>;
}

/// SQLite-backed datastore
#[derive(Clone)]
pub struct SqliteDatastore {
    db: SqlitePool,
}

impl SqliteDatastore {
    /// Open a datastore over an existing pool, creating the backing table
    pub async fn init(db: SqlitePool) -> ProfileResult<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS datastore (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL
            )
            "#,
        )
        .execute(&db)
        .await?;

        Ok(Self { db })
    }
}

#[async_trait]
impl Datastore for SqliteDatastore {
    async fn get(&self, key: &str) -> ProfileResult<Option<Vec<u8>>> {
        let row = sqlx::query("SELECT value FROM datastore WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &[u8]) -> ProfileResult<()> {
        sqlx::query(
            r#"
            INSERT INTO datastore (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}
