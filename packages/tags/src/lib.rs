// ABOUTME: Tag management system for labeling items within stores
// ABOUTME: Provides types and storage layer for tags and their item links

pub mod storage;
pub mod types;

// Re-export main types
pub use storage::TagStorage;
pub use types::{Tag, TagCreateInput};
