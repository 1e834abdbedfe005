// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and storage layers

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use stockroom_inventory::{ItemStorage, StoreStorage};
use stockroom_storage::StorageError;
use stockroom_tags::TagStorage;

/// Shared database state for API handlers. Cloned per request; each
/// storage call is its own unit of work against the pool.
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub store_storage: Arc<StoreStorage>,
    pub item_storage: Arc<ItemStorage>,
    pub tag_storage: Arc<TagStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let store_storage = Arc::new(StoreStorage::new(pool.clone()));
        let item_storage = Arc::new(ItemStorage::new(pool.clone()));
        let tag_storage = Arc::new(TagStorage::new(pool.clone()));

        Self {
            pool,
            store_storage,
            item_storage,
            tag_storage,
        }
    }

    /// Initialize database state with default configuration
    pub async fn init() -> Result<Self, StorageError> {
        Self::init_with_path(None).await
    }

    /// Initialize database state with optional custom database path
    pub async fn init_with_path(database_path: Option<PathBuf>) -> Result<Self, StorageError> {
        let database_path = database_path.unwrap_or_else(|| PathBuf::from("stockroom.db"));

        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
            }
        }

        debug!("Connecting to database: {}", database_path.display());

        let options = SqliteConnectOptions::new()
            .filename(&database_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        // Configure SQLite settings
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        // Run migrations
        sqlx::migrate!("../storage/migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        debug!("Database migrations completed");

        Ok(Self::new(pool))
    }
}
