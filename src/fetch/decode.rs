use serde_json::{Map, Value};

use crate::error::AppError;

use super::FetchResult;

/// Move `key` out of a JSON object, naming `path` in the error when it is absent.
pub fn take_key(value: Value, key: &str, path: &str) -> FetchResult<Value> {
    match value {
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| AppError::missing_key(format!("{path}.{key}"))),
        _ => Err(AppError::UnexpectedShape {
            path: path.to_string(),
            expected: "an object",
        }),
    }
}

/// First element of an array that the provider promises is non-empty.
pub fn first_element(value: Value, product: &str) -> FetchResult<Value> {
    match value {
        Value::Array(items) => items.into_iter().next().ok_or_else(|| AppError::EmptySequence {
            product: product.to_string(),
        }),
        _ => Err(AppError::UnexpectedShape {
            path: product.to_string(),
            expected: "an array",
        }),
    }
}

pub fn into_object(value: Value, path: &str) -> FetchResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::UnexpectedShape {
            path: path.to_string(),
            expected: "an object",
        }),
    }
}

/// Split an array payload into its object rows. `null` is treated as no rows.
pub fn into_rows(value: Value, path: &str) -> FetchResult<Vec<Map<String, Value>>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| into_object(item, &format!("{path}[{idx}]")))
            .collect(),
        _ => Err(AppError::UnexpectedShape {
            path: path.to_string(),
            expected: "an array",
        }),
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Plain-text form of a cell, used by CSV export and terminal rendering.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
