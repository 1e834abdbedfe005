// ABOUTME: Shared storage error taxonomy for the Stockroom data layers
// ABOUTME: Also hosts the SQL migrations embedded via sqlx::migrate!

use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Store {0} not found")]
    StoreNotFound(i64),
    #[error("Item {0} not found")]
    ItemNotFound(i64),
    #[error("Tag {0} not found")]
    TagNotFound(i64),
    #[error("Tag {tag_id} is not linked to item {item_id}")]
    TagNotLinked { item_id: i64, tag_id: i64 },
    #[error("A store named '{0}' already exists")]
    DuplicateStoreName(String),
    #[error("A tag with that same name already exists in the store")]
    DuplicateTagName { store_id: i64, name: String },
    #[error("Could not delete tag: {links} item(s) are still tagged with it")]
    TagInUse { tag_id: i64, links: i64 },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Whether this error maps to a missing entity rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::StoreNotFound(_)
                | StorageError::ItemNotFound(_)
                | StorageError::TagNotFound(_)
                | StorageError::TagNotLinked { .. }
        )
    }

    /// Whether this error is a constraint conflict the caller caused,
    /// as opposed to a transient or connectivity failure.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            StorageError::DuplicateStoreName(_)
                | StorageError::DuplicateTagName { .. }
                | StorageError::TagInUse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(StorageError::TagNotFound(7).is_not_found());
        assert!(StorageError::TagNotLinked {
            item_id: 1,
            tag_id: 2
        }
        .is_not_found());
        assert!(!StorageError::Database("boom".to_string()).is_not_found());
    }

    #[test]
    fn test_conflict_classification() {
        assert!(StorageError::DuplicateTagName {
            store_id: 1,
            name: "fragile".to_string()
        }
        .is_conflict());
        assert!(StorageError::TagInUse {
            tag_id: 3,
            links: 2
        }
        .is_conflict());
        assert!(!StorageError::TagNotFound(3).is_conflict());
    }

    #[test]
    fn test_duplicate_tag_message_matches_contract() {
        let err = StorageError::DuplicateTagName {
            store_id: 1,
            name: "fragile".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "A tag with that same name already exists in the store"
        );
    }
}
