// ABOUTME: Store and item management for Stockroom
// ABOUTME: Provides types and storage layers for the owning entities of tags

pub mod items;
pub mod stores;
pub mod types;

// Re-export main types
pub use items::ItemStorage;
pub use stores::StoreStorage;
pub use types::{Item, ItemCreateInput, Store, StoreCreateInput};
