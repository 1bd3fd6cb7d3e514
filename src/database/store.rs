//! Document store abstraction and DynamoDB implementation
//!
//! The repository layer talks to [`DocumentStore`], an object-safe trait
//! over a schemaless collection/document contract: put, partial-merge
//! update, get, delete, full scan, and equality scan. Production uses
//! [`DynamoDocumentStore`]; the test suites use the in-memory store from
//! `database::memory`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType, TableStatus,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::database::attrs::{self, JsonMap};
use crate::errors::{AppError, AppResult};

/// Schemaless collection/document contract
///
/// Only equality filtering is supported; range or compound predicates are
/// out of scope and are implemented in memory by the services that need
/// them.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Make sure the backing collection exists, creating it when absent
    async fn ensure_collection(&self, collection: &str) -> AppResult<()>;

    /// Persist a full document (the item must carry its `id` field)
    async fn put(&self, collection: &str, item: JsonMap) -> AppResult<()>;

    /// Merge the supplied fields into an existing document. Fails with
    /// `NotFound` when the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: JsonMap) -> AppResult<()>;

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<JsonMap>>;

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()>;

    async fn scan(&self, collection: &str) -> AppResult<Vec<JsonMap>>;

    /// Equality filter on a single top-level field
    async fn scan_eq(&self, collection: &str, field: &str, value: Value)
    -> AppResult<Vec<JsonMap>>;
}

/// DynamoDB-backed document store
///
/// Collections map to tables named `{table_prefix}{collection}`, keyed by
/// the string `id` attribute.
#[derive(Debug, Clone)]
pub struct DynamoDocumentStore {
    client: aws_sdk_dynamodb::Client,
    table_prefix: String,
}

impl DynamoDocumentStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_prefix: impl Into<String>) -> Self {
        Self {
            client,
            table_prefix: table_prefix.into(),
        }
    }

    fn table_name(&self, collection: &str) -> String {
        format!("{}{}", self.table_prefix, collection)
    }

    async fn table_exists(&self, table: &str) -> AppResult<bool> {
        match self.client.describe_table().table_name(table).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_resource_not_found_exception() {
                    Ok(false)
                } else {
                    Err(AppError::database(service_err.to_string()))
                }
            }
        }
    }

    async fn wait_until_active(&self, table: &str) -> AppResult<()> {
        for _ in 0..30 {
            let described = self
                .client
                .describe_table()
                .table_name(table)
                .send()
                .await
                .map_err(|e| AppError::database(e.to_string()))?;
            if described
                .table
                .and_then(|t| t.table_status)
                .is_some_and(|s| s == TableStatus::Active)
            {
                return Ok(());
            }
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        }
        Err(AppError::database(format!(
            "table {table} did not become active"
        )))
    }
}

/// Build a `SET` update expression from a partial field map.
///
/// Attribute names are aliased (`#n0`, `#n1`, ...) so reserved words like
/// `status` or `order` are safe to merge.
fn build_update_expression(
    fields: &JsonMap,
) -> (
    String,
    HashMap<String, String>,
    HashMap<String, AttributeValue>,
) {
    let mut assignments = Vec::with_capacity(fields.len());
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    for (i, (field, value)) in fields.iter().enumerate() {
        let name_alias = format!("#n{i}");
        let value_alias = format!(":v{i}");
        assignments.push(format!("{name_alias} = {value_alias}"));
        names.insert(name_alias, field.clone());
        values.insert(value_alias, attrs::to_attr(value));
    }

    (format!("SET {}", assignments.join(", ")), names, values)
}

#[async_trait]
impl DocumentStore for DynamoDocumentStore {
    async fn ensure_collection(&self, collection: &str) -> AppResult<()> {
        let table = self.table_name(collection);
        if self.table_exists(&table).await? {
            debug!("collection '{collection}' exists");
            return Ok(());
        }

        self.client
            .create_table()
            .table_name(&table)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("id")
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .map_err(|e| AppError::database(e.to_string()))?,
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("id")
                    .key_type(KeyType::Hash)
                    .build()
                    .map_err(|e| AppError::database(e.to_string()))?,
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        self.wait_until_active(&table).await?;
        info!("created collection: {collection}");
        Ok(())
    }

    #[tracing::instrument(skip(self, item))]
    async fn put(&self, collection: &str, item: JsonMap) -> AppResult<()> {
        self.client
            .put_item()
            .table_name(self.table_name(collection))
            .set_item(Some(attrs::to_item(&item)))
            .send()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        Ok(())
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update(&self, collection: &str, id: &str, fields: JsonMap) -> AppResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let (expression, names, values) = build_update_expression(&fields);

        let result = self
            .client
            .update_item()
            .table_name(self.table_name(collection))
            .key("id", AttributeValue::S(id.to_string()))
            .update_expression(expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .condition_expression("attribute_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_conditional_check_failed_exception() {
                    Err(AppError::not_found(collection, id))
                } else {
                    Err(AppError::database(service_err.to_string()))
                }
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<JsonMap>> {
        let output = self
            .client
            .get_item()
            .table_name(self.table_name(collection))
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        match output.item {
            Some(item) => Ok(Some(attrs::from_item(&item)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        self.client
            .delete_item()
            .table_name(self.table_name(collection))
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn scan(&self, collection: &str) -> AppResult<Vec<JsonMap>> {
        let table = self.table_name(collection);
        let mut documents = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| AppError::database(e.to_string()))?;

            for item in output.items.unwrap_or_default() {
                documents.push(attrs::from_item(&item)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(documents)
    }

    #[tracing::instrument(skip(self, value))]
    async fn scan_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> AppResult<Vec<JsonMap>> {
        let table = self.table_name(collection);
        let mut documents = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&table)
                .filter_expression("#f = :v")
                .expression_attribute_names("#f", field)
                .expression_attribute_values(":v", attrs::to_attr(&value))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| AppError::database(e.to_string()))?;

            for item in output.items.unwrap_or_default() {
                documents.push(attrs::from_item(&item)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_expression_aliases_reserved_words() {
        let mut fields = JsonMap::new();
        fields.insert("status".to_string(), json!("SOLD"));
        fields.insert("order".to_string(), json!(3));

        let (expression, names, values) = build_update_expression(&fields);

        assert!(expression.starts_with("SET "));
        assert_eq!(names.len(), 2);
        assert_eq!(values.len(), 2);
        assert!(names.values().any(|n| n == "status"));
        assert!(names.values().any(|n| n == "order"));
        for alias in names.keys() {
            assert!(expression.contains(alias.as_str()));
        }
    }
}
