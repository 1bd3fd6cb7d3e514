//! JSON <-> DynamoDB attribute conversion
//!
//! Entities are serialized to `serde_json` object maps before they reach
//! the store; this module translates those maps into DynamoDB
//! `AttributeValue`s and back. Numbers ride in DynamoDB's string-backed
//! `N` type; exact decimals (prices) are serialized as strings upstream so
//! no precision is lost here.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use crate::errors::{AppError, AppResult};

pub type JsonMap = Map<String, Value>;

/// Convert a JSON value into a DynamoDB attribute
pub fn to_attr(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attr).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), to_attr(v)))
                .collect(),
        ),
    }
}

/// Convert a DynamoDB attribute back into a JSON value
pub fn from_attr(attr: &AttributeValue) -> AppResult<Value> {
    match attr {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::L(items) => Ok(Value::Array(
            items.iter().map(from_attr).collect::<AppResult<_>>()?,
        )),
        AttributeValue::M(map) => {
            let mut out = JsonMap::new();
            for (k, v) in map {
                out.insert(k.clone(), from_attr(v)?);
            }
            Ok(Value::Object(out))
        }
        other => Err(AppError::database(format!(
            "unsupported attribute type: {other:?}"
        ))),
    }
}

fn parse_number(raw: &str) -> AppResult<Value> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::Number(Number::from(i)));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Value::Number(Number::from(u)));
    }
    let f = raw
        .parse::<f64>()
        .map_err(|_| AppError::database(format!("invalid numeric attribute: {raw}")))?;
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| AppError::database(format!("non-finite numeric attribute: {raw}")))
}

/// Convert a whole JSON object map into a DynamoDB item
pub fn to_item(map: &JsonMap) -> HashMap<String, AttributeValue> {
    map.iter().map(|(k, v)| (k.clone(), to_attr(v))).collect()
}

/// Convert a DynamoDB item into a JSON object map
pub fn from_item(item: &HashMap<String, AttributeValue>) -> AppResult<JsonMap> {
    let mut out = JsonMap::new();
    for (k, v) in item {
        out.insert(k.clone(), from_attr(v)?);
    }
    Ok(out)
}
