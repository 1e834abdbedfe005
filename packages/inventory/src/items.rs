// ABOUTME: Item storage layer using SQLite
// ABOUTME: Items belong to a store and carry the tag association set

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{Item, ItemCreateInput};
use stockroom_storage::{StorageError, StorageResult};

pub struct ItemStorage {
    pool: SqlitePool,
}

impl ItemStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all items
    pub async fn list_items(&self) -> StorageResult<Vec<Item>> {
        debug!("Fetching all items");

        let rows = sqlx::query("SELECT * FROM items ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_item).collect()
    }

    /// Get a single item by ID
    pub async fn get_item(&self, item_id: i64) -> StorageResult<Item> {
        debug!("Fetching item: {}", item_id);

        let row = sqlx::query("SELECT * FROM items WHERE id = ?")
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(r) => row_to_item(&r),
            None => Err(StorageError::ItemNotFound(item_id)),
        }
    }

    /// Create a new item under an existing store
    pub async fn create_item(&self, input: ItemCreateInput) -> StorageResult<Item> {
        debug!("Creating item: {} (store: {})", input.name, input.store_id);

        let store_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM stores WHERE id = ?")
            .bind(input.store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if store_exists.is_none() {
            return Err(StorageError::StoreNotFound(input.store_id));
        }

        let result = sqlx::query("INSERT INTO items (name, price, store_id) VALUES (?, ?, ?)")
            .bind(&input.name)
            .bind(input.price)
            .bind(input.store_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        self.get_item(result.last_insert_rowid()).await
    }

    /// Delete an item. Association rows are removed by ON DELETE CASCADE.
    pub async fn delete_item(&self, item_id: i64) -> StorageResult<()> {
        debug!("Deleting item: {}", item_id);

        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(item_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::ItemNotFound(item_id));
        }

        Ok(())
    }
}

/// Convert a database row to an Item
fn row_to_item(row: &sqlx::sqlite::SqliteRow) -> StorageResult<Item> {
    Ok(Item {
        id: row.try_get("id").map_err(StorageError::Sqlx)?,
        name: row.try_get("name").map_err(StorageError::Sqlx)?,
        price: row.try_get("price").map_err(StorageError::Sqlx)?,
        store_id: row.try_get("store_id").map_err(StorageError::Sqlx)?,
    })
}
