// ABOUTME: Store storage layer using SQLite
// ABOUTME: Stores own tags; the tag layer only reads their identity

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{Store, StoreCreateInput};
use stockroom_storage::{StorageError, StorageResult};

pub struct StoreStorage {
    pool: SqlitePool,
}

impl StoreStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all stores
    pub async fn list_stores(&self) -> StorageResult<Vec<Store>> {
        debug!("Fetching all stores");

        let rows = sqlx::query("SELECT * FROM stores ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_store).collect()
    }

    /// Get a single store by ID
    pub async fn get_store(&self, store_id: i64) -> StorageResult<Store> {
        debug!("Fetching store: {}", store_id);

        let row = sqlx::query("SELECT * FROM stores WHERE id = ?")
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(r) => row_to_store(&r),
            None => Err(StorageError::StoreNotFound(store_id)),
        }
    }

    /// Create a new store. The unique constraint on the name column is
    /// the authority on duplicates; a violation maps to a typed error.
    pub async fn create_store(&self, input: StoreCreateInput) -> StorageResult<Store> {
        debug!("Creating store: {}", input.name);

        let result = sqlx::query("INSERT INTO stores (name) VALUES (?)")
            .bind(&input.name)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => {
                    StorageError::DuplicateStoreName(input.name.clone())
                }
                _ => StorageError::Sqlx(e),
            })?;

        self.get_store(result.last_insert_rowid()).await
    }

    /// Delete a store. Items and tags owned by the store are removed by
    /// the schema's ON DELETE CASCADE.
    pub async fn delete_store(&self, store_id: i64) -> StorageResult<()> {
        debug!("Deleting store: {}", store_id);

        let result = sqlx::query("DELETE FROM stores WHERE id = ?")
            .bind(store_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::StoreNotFound(store_id));
        }

        Ok(())
    }
}

/// Convert a database row to a Store
fn row_to_store(row: &sqlx::sqlite::SqliteRow) -> StorageResult<Store> {
    Ok(Store {
        id: row.try_get("id").map_err(StorageError::Sqlx)?,
        name: row.try_get("name").map_err(StorageError::Sqlx)?,
    })
}
