use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::client::Waiters;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::RequestId;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, ConsumedCapacity, KeySchemaElement, KeyType,
    ReturnValue, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use std::time::Duration;
use tarmac_domain::{StoreError, StoreResult, WriteAck};
use tracing::{debug, info, warn};

use crate::app_config::AwsConfig;
use crate::backend::{ItemBackend, TableRef};
use crate::conversions::Item;

const TABLE_ACTIVE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct DynamoBackend {
    client: Client,
}

impl DynamoBackend {
    pub async fn connect(aws: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(aws.region.clone()));

        if let Some(endpoint_url) = &aws.endpoint_url {
            if !endpoint_url.is_empty() {
                info!("Using custom DynamoDB endpoint: {}", endpoint_url);
                loader = loader.endpoint_url(endpoint_url);
            }
        }

        let shared = loader.load().await;
        info!("DynamoDB client ready in region {}", aws.region);
        Self { client: Client::new(&shared) }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn key_of(table: &TableRef, key: &str) -> (String, AttributeValue) {
    (table.key_attribute.to_string(), AttributeValue::S(key.to_string()))
}

fn ack(request_id: Option<&str>, consumed: Option<&ConsumedCapacity>) -> WriteAck {
    WriteAck {
        request_id: request_id.map(str::to_string),
        consumed_capacity: consumed.and_then(|c| c.capacity_units()),
    }
}

fn service_error<E, R>(operation: &'static str, table: &TableRef, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    StoreError::Service {
        operation,
        table: table.name.clone(),
        code: err.code().map(str::to_string),
        message: err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string()),
    }
}

fn local_error(operation: &'static str, table: &TableRef, err: impl std::error::Error) -> StoreError {
    StoreError::Service {
        operation,
        table: table.name.clone(),
        code: None,
        message: DisplayErrorContext(&err).to_string(),
    }
}

#[async_trait]
impl ItemBackend for DynamoBackend {
    async fn put_item(&self, table: &TableRef, item: Item) -> StoreResult<WriteAck> {
        debug!("PutItem {}", table.name);
        let output = self
            .client
            .put_item()
            .table_name(&table.name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| service_error("PutItem", table, e))?;

        Ok(ack(output.request_id(), output.consumed_capacity()))
    }

    async fn get_item(&self, table: &TableRef, key: &str) -> StoreResult<Option<Item>> {
        debug!("GetItem {} {}={}", table.name, table.key_attribute, key);
        let (name, value) = key_of(table, key);
        let output = self
            .client
            .get_item()
            .table_name(&table.name)
            .key(name, value)
            .send()
            .await
            .map_err(|e| service_error("GetItem", table, e))?;

        Ok(output.item)
    }

    async fn update_item(
        &self,
        table: &TableRef,
        key: &str,
        updates: Vec<(&'static str, AttributeValue)>,
        require_existing: bool,
    ) -> StoreResult<Item> {
        debug!("UpdateItem {} {}={} guard={}", table.name, table.key_attribute, key, require_existing);
        let (name, value) = key_of(table, key);

        // Placeholders for every attribute so reserved words like `status` need no special casing
        let mut names = HashMap::new();
        let mut values = HashMap::new();
        let mut clauses = Vec::with_capacity(updates.len());
        for (i, (attribute, new_value)) in updates.into_iter().enumerate() {
            let name_placeholder = format!("#a{}", i);
            let value_placeholder = format!(":v{}", i);
            clauses.push(format!("{} = {}", name_placeholder, value_placeholder));
            names.insert(name_placeholder, attribute.to_string());
            values.insert(value_placeholder, new_value);
        }

        let mut request = self
            .client
            .update_item()
            .table_name(&table.name)
            .key(name, value)
            .update_expression(format!("SET {}", clauses.join(", ")))
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::UpdatedNew);

        if require_existing {
            request = request
                .condition_expression("attribute_exists(#key)")
                .expression_attribute_names("#key", table.key_attribute);
        }

        match request.send().await {
            Ok(output) => Ok(output.attributes.unwrap_or_default()),
            Err(err) => {
                let missing = err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception());
                if require_existing && missing {
                    warn!("Refusing update of missing item {} in {}", key, table.name);
                    return Err(StoreError::NotFound { table: table.name.clone(), key: key.to_string() });
                }
                Err(service_error("UpdateItem", table, err))
            }
        }
    }

    async fn delete_item(&self, table: &TableRef, key: &str) -> StoreResult<WriteAck> {
        debug!("DeleteItem {} {}={}", table.name, table.key_attribute, key);
        let (name, value) = key_of(table, key);
        let output = self
            .client
            .delete_item()
            .table_name(&table.name)
            .key(name, value)
            .send()
            .await
            .map_err(|e| service_error("DeleteItem", table, e))?;

        Ok(ack(output.request_id(), output.consumed_capacity()))
    }

    async fn ensure_table(&self, table: &TableRef) -> StoreResult<()> {
        let key_schema = KeySchemaElement::builder()
            .attribute_name(table.key_attribute)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| local_error("CreateTable", table, e))?;
        let key_definition = AttributeDefinition::builder()
            .attribute_name(table.key_attribute)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| local_error("CreateTable", table, e))?;

        let result = self
            .client
            .create_table()
            .table_name(&table.name)
            .key_schema(key_schema)
            .attribute_definitions(key_definition)
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await;

        match result {
            Ok(_) => info!("Created table {}", table.name),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_resource_in_use_exception()) => {
                debug!("Table {} already exists", table.name);
                return Ok(());
            }
            Err(err) => return Err(service_error("CreateTable", table, err)),
        }

        self.client
            .wait_until_table_exists()
            .table_name(&table.name)
            .wait(TABLE_ACTIVE_TIMEOUT)
            .await
            .map_err(|e| local_error("DescribeTable", table, e))?;
        info!("Table {} is active", table.name);
        Ok(())
    }
}
