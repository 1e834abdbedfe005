// ABOUTME: Tag storage layer using SQLite
// ABOUTME: Handles store-scoped tag CRUD and the item/tag association table

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{Tag, TagCreateInput};
use stockroom_storage::{StorageError, StorageResult};

pub struct TagStorage {
    pool: SqlitePool,
}

impl TagStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all tags owned by a store, in insertion order.
    /// Fails with StoreNotFound rather than returning an empty list for
    /// an unknown store.
    pub async fn list_tags_for_store(&self, store_id: i64) -> StorageResult<Vec<Tag>> {
        debug!("Fetching tags for store: {}", store_id);

        self.ensure_store_exists(store_id).await?;

        let rows = sqlx::query("SELECT * FROM tags WHERE store_id = ? ORDER BY id")
            .bind(store_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_tag).collect()
    }

    /// List all tags linked to an item, in link order
    pub async fn list_tags_for_item(&self, item_id: i64) -> StorageResult<Vec<Tag>> {
        debug!("Fetching tags for item: {}", item_id);

        self.ensure_item_exists(item_id).await?;

        let rows = sqlx::query(
            r#"
            SELECT t.* FROM tags t
            JOIN items_tags it ON it.tag_id = t.id
            WHERE it.item_id = ?
            ORDER BY t.id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_tag).collect()
    }

    /// Get a single tag by ID
    pub async fn get_tag(&self, tag_id: i64) -> StorageResult<Tag> {
        debug!("Fetching tag: {}", tag_id);

        let row = sqlx::query("SELECT * FROM tags WHERE id = ?")
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(r) => row_to_tag(&r),
            None => Err(StorageError::TagNotFound(tag_id)),
        }
    }

    /// Create a new tag under an existing store. Name uniqueness within
    /// the store is enforced by the UNIQUE(store_id, name) constraint, so
    /// two concurrent creates cannot both succeed.
    pub async fn create_tag(&self, store_id: i64, input: TagCreateInput) -> StorageResult<Tag> {
        debug!("Creating tag: {} (store: {})", input.name, store_id);

        self.ensure_store_exists(store_id).await?;

        let result = sqlx::query("INSERT INTO tags (name, store_id) VALUES (?, ?)")
            .bind(&input.name)
            .bind(store_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => StorageError::DuplicateTagName {
                    store_id,
                    name: input.name.clone(),
                },
                _ => StorageError::Sqlx(e),
            })?;

        self.get_tag(result.last_insert_rowid()).await
    }

    /// Link a tag to an item and return the tag. Linking an already
    /// linked pair is a no-op; the association is a set.
    pub async fn link_tag(&self, item_id: i64, tag_id: i64) -> StorageResult<Tag> {
        debug!("Linking tag {} to item {}", tag_id, item_id);

        self.ensure_item_exists(item_id).await?;
        let tag = self.get_tag(tag_id).await?;

        sqlx::query("INSERT OR IGNORE INTO items_tags (item_id, tag_id) VALUES (?, ?)")
            .bind(item_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(tag)
    }

    /// Remove the link between a tag and an item. Unlinking a pair that
    /// was never linked is reported as TagNotLinked, not a crash.
    pub async fn unlink_tag(&self, item_id: i64, tag_id: i64) -> StorageResult<()> {
        debug!("Unlinking tag {} from item {}", tag_id, item_id);

        self.ensure_item_exists(item_id).await?;
        self.get_tag(tag_id).await?;

        let result = sqlx::query("DELETE FROM items_tags WHERE item_id = ? AND tag_id = ?")
            .bind(item_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::TagNotLinked { item_id, tag_id });
        }

        Ok(())
    }

    /// Delete a tag permanently, but only while no items are linked to
    /// it. A linked tag is left untouched and the count is reported.
    pub async fn delete_tag(&self, tag_id: i64) -> StorageResult<()> {
        debug!("Deleting tag: {}", tag_id);

        // Run the guard and the delete in one transaction so the check
        // cannot go stale between statements.
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM tags WHERE id = ?")
            .bind(tag_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        if exists.is_none() {
            return Err(StorageError::TagNotFound(tag_id));
        }

        let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items_tags WHERE tag_id = ?")
            .bind(tag_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        if links > 0 {
            return Err(StorageError::TagInUse { tag_id, links });
        }

        sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(tag_id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(())
    }

    async fn ensure_store_exists(&self, store_id: i64) -> StorageResult<()> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM stores WHERE id = ?")
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match exists {
            Some(_) => Ok(()),
            None => Err(StorageError::StoreNotFound(store_id)),
        }
    }

    async fn ensure_item_exists(&self, item_id: i64) -> StorageResult<()> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM items WHERE id = ?")
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match exists {
            Some(_) => Ok(()),
            None => Err(StorageError::ItemNotFound(item_id)),
        }
    }
}

/// Convert a database row to a Tag
fn row_to_tag(row: &sqlx::sqlite::SqliteRow) -> StorageResult<Tag> {
    Ok(Tag {
        id: row.try_get("id").map_err(StorageError::Sqlx)?,
        name: row.try_get("name").map_err(StorageError::Sqlx)?,
        store_id: row.try_get("store_id").map_err(StorageError::Sqlx)?,
    })
}
