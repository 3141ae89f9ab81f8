use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tarmac_domain::{StoreResult, WriteAck};

use crate::conversions::Item;

/// Addressing for one table: its name and the string hash key attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub key_attribute: &'static str,
}

impl TableRef {
    pub fn new(name: impl Into<String>, key_attribute: &'static str) -> Self {
        Self { name: name.into(), key_attribute }
    }
}

/// Item-level operations against a key-value table store.
#[async_trait]
pub trait ItemBackend: Send + Sync {
    async fn put_item(&self, table: &TableRef, item: Item) -> StoreResult<WriteAck>;

    async fn get_item(&self, table: &TableRef, key: &str) -> StoreResult<Option<Item>>;

    /// SETs each attribute and returns the updated values. With `require_existing`
    /// a missing key yields `StoreError::NotFound`, otherwise a new item is created.
    async fn update_item(
        &self,
        table: &TableRef,
        key: &str,
        updates: Vec<(&'static str, AttributeValue)>,
        require_existing: bool,
    ) -> StoreResult<Item>;

    async fn delete_item(&self, table: &TableRef, key: &str) -> StoreResult<WriteAck>;

    /// Creates the table if it does not exist yet.
    async fn ensure_table(&self, table: &TableRef) -> StoreResult<()>;
}
