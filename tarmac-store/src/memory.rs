use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use tarmac_domain::{StoreError, StoreResult, WriteAck};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::backend::{ItemBackend, TableRef};
use crate::conversions::Item;

/// In-process table store with DynamoDB item semantics: puts overwrite,
/// unguarded updates upsert, deletes are idempotent, and any item call on a
/// table that was never created fails with `ResourceNotFoundException`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, HashMap<String, Item>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose tables already exist, like pre-provisioned DynamoDB tables.
    pub fn with_tables<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tables = names.into_iter().map(|name| (name.into(), HashMap::new())).collect();
        Self { tables: RwLock::new(tables) }
    }

    /// Number of items currently stored in a table
    pub async fn item_count(&self, table: &TableRef) -> usize {
        self.tables.read().await.get(&table.name).map_or(0, HashMap::len)
    }
}

fn table_not_found(operation: &'static str, table: &TableRef) -> StoreError {
    StoreError::Service {
        operation,
        table: table.name.clone(),
        code: Some("ResourceNotFoundException".to_string()),
        message: format!("Requested resource not found: Table: {} not found", table.name),
    }
}

#[async_trait]
impl ItemBackend for MemoryBackend {
    async fn put_item(&self, table: &TableRef, item: Item) -> StoreResult<WriteAck> {
        let key = match item.get(table.key_attribute) {
            Some(AttributeValue::S(key)) => key.clone(),
            _ => {
                return Err(StoreError::Service {
                    operation: "PutItem",
                    table: table.name.clone(),
                    code: Some("ValidationException".to_string()),
                    message: format!("missing string key attribute {}", table.key_attribute),
                })
            }
        };

        debug!("memory PutItem {} {}", table.name, key);
        let mut tables = self.tables.write().await;
        let items = tables.get_mut(&table.name).ok_or_else(|| table_not_found("PutItem", table))?;
        items.insert(key, item);
        Ok(WriteAck::default())
    }

    async fn get_item(&self, table: &TableRef, key: &str) -> StoreResult<Option<Item>> {
        let tables = self.tables.read().await;
        let items = tables.get(&table.name).ok_or_else(|| table_not_found("GetItem", table))?;
        Ok(items.get(key).cloned())
    }

    async fn update_item(
        &self,
        table: &TableRef,
        key: &str,
        updates: Vec<(&'static str, AttributeValue)>,
        require_existing: bool,
    ) -> StoreResult<Item> {
        let mut tables = self.tables.write().await;
        let items = tables.get_mut(&table.name).ok_or_else(|| table_not_found("UpdateItem", table))?;

        if require_existing && !items.contains_key(key) {
            warn!("Refusing update of missing item {} in {}", key, table.name);
            return Err(StoreError::NotFound { table: table.name.clone(), key: key.to_string() });
        }

        let item = items.entry(key.to_string()).or_insert_with(|| {
            HashMap::from([(table.key_attribute.to_string(), AttributeValue::S(key.to_string()))])
        });

        let mut updated = Item::new();
        for (attribute, value) in updates {
            item.insert(attribute.to_string(), value.clone());
            updated.insert(attribute.to_string(), value);
        }
        Ok(updated)
    }

    async fn delete_item(&self, table: &TableRef, key: &str) -> StoreResult<WriteAck> {
        let mut tables = self.tables.write().await;
        let items = tables.get_mut(&table.name).ok_or_else(|| table_not_found("DeleteItem", table))?;
        items.remove(key);
        Ok(WriteAck::default())
    }

    async fn ensure_table(&self, table: &TableRef) -> StoreResult<()> {
        self.tables.write().await.entry(table.name.clone()).or_default();
        Ok(())
    }
}
