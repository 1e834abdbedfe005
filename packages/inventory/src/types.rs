// ABOUTME: Store and item type definitions
// ABOUTME: Wire representations match the HTTP contract exactly

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCreateInput {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub store_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreateInput {
    pub name: String,
    pub price: f64,
    pub store_id: i64,
}
