//! SQLite-backed inventory store.
//!
//! One row per record: `(partition_key, sort_key)` primary key plus the
//! attribute map as a JSON text column. Conditional updates compare with
//! `json_extract` inside a single transaction; the first update that matches
//! no row rolls the whole batch back.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{
    ConditionalUpdate, InventoryStore, ItemKey, StoreError, StoredItem,
};

/// SQLite implementation of the inventory store.
pub struct SqliteInventoryStore {
    pool: SqlitePool,
    sql: Statements,
}

struct Statements {
    get: String,
    query_prefix: String,
    put: String,
    conditional_update: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        Self {
            get: format!(
                "SELECT attributes FROM {table} WHERE partition_key = ? AND sort_key = ?"
            ),
            query_prefix: format!(
                r#"
                SELECT sort_key, attributes FROM {table}
                WHERE partition_key = ? AND substr(sort_key, 1, ?) = ?
                ORDER BY sort_key
                "#
            ),
            put: format!(
                r#"
                INSERT INTO {table} (partition_key, sort_key, attributes)
                VALUES (?, ?, ?)
                ON CONFLICT(partition_key, sort_key) DO UPDATE SET
                    attributes = excluded.attributes
                "#
            ),
            conditional_update: format!(
                r#"
                UPDATE {table}
                SET attributes = json_set(attributes, ?, ?)
                WHERE partition_key = ? AND sort_key = ?
                  AND json_type(attributes, ?) = 'text'
                  AND json_extract(attributes, ?) = ?
                "#
            ),
        }
    }
}

impl SqliteInventoryStore {
    /// Open (creating if needed) the database file and the inventory table.
    ///
    /// `table` must be a plain identifier; it comes from the resolved key schema.
    pub async fn new(db_path: &str, table: &str) -> Result<Self, StoreError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| StoreError::unavailable("connect", e))?;

        Self::with_pool(pool, table).await
    }

    /// Use an existing pool, creating the inventory table if missing.
    pub async fn with_pool(pool: SqlitePool, table: &str) -> Result<Self, StoreError> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                partition_key TEXT NOT NULL,
                sort_key TEXT NOT NULL,
                attributes TEXT NOT NULL,
                PRIMARY KEY (partition_key, sort_key)
            )
            "#
        ))
        .execute(&pool)
        .await
        .map_err(|e| StoreError::unavailable("create_table", e))?;

        tracing::debug!(table = %table, "Inventory table ready");

        Ok(Self {
            pool,
            sql: Statements::for_table(table),
        })
    }

    fn decode(key: ItemKey, raw: &str) -> Result<StoredItem, StoreError> {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(attributes)) => Ok(StoredItem { key, attributes }),
            Ok(other) => Err(StoreError::corrupt(
                key,
                format!("attributes must be a JSON object, got {other}"),
            )),
            Err(e) => Err(StoreError::corrupt(key, e)),
        }
    }
}

fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field)
}

#[async_trait]
impl InventoryStore for SqliteInventoryStore {
    async fn get(&self, key: &ItemKey) -> Result<Option<StoredItem>, StoreError> {
        let row = sqlx::query(&self.sql.get)
            .bind(&key.partition)
            .bind(&key.sort)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable("get", e))?;

        match row {
            Some(row) => {
                let raw: String = row.get("attributes");
                Self::decode(key.clone(), &raw).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn query_prefix(
        &self,
        partition: &str,
        prefix: &str,
    ) -> Result<Vec<StoredItem>, StoreError> {
        let rows = sqlx::query(&self.sql.query_prefix)
            .bind(partition)
            .bind(prefix.chars().count() as i64)
            .bind(prefix)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable("query_prefix", e))?;

        rows.iter()
            .map(|row| {
                let sort: String = row.get("sort_key");
                let raw: String = row.get("attributes");
                Self::decode(ItemKey::new(partition, sort), &raw)
            })
            .collect()
    }

    async fn put(&self, item: StoredItem) -> Result<(), StoreError> {
        let json = serde_json::Value::Object(item.attributes).to_string();

        sqlx::query(&self.sql.put)
            .bind(&item.key.partition)
            .bind(&item.key.sort)
            .bind(json)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable("put", e))?;

        Ok(())
    }

    async fn atomic_update(&self, updates: Vec<ConditionalUpdate>) -> Result<(), StoreError> {
        if updates.is_empty() {
            return Ok(());
        }

        let mut txn = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::unavailable("atomic_update", e))?;

        for update in &updates {
            let path = json_path(&update.field);
            let result = sqlx::query(&self.sql.conditional_update)
                .bind(&path)
                .bind(&update.new)
                .bind(&update.key.partition)
                .bind(&update.key.sort)
                .bind(&path)
                .bind(&path)
                .bind(&update.expected)
                .execute(&mut *txn)
                .await
                .map_err(|e| StoreError::unavailable("atomic_update", e))?;

            if result.rows_affected() == 0 {
                txn.rollback()
                    .await
                    .map_err(|e| StoreError::unavailable("atomic_update", e))?;
                return Err(StoreError::conflict(update.key.clone(), &update.field));
            }
        }

        txn.commit()
            .await
            .map_err(|e| StoreError::unavailable("atomic_update", e))?;

        Ok(())
    }
}
