//! Normalization of backend payload shapes.
//!
//! Some endpoints return a bare JSON array, others wrap it as
//! `{ "data": [...] }`. Single records come back either bare or as
//! `{ "data": {...} }`. Adapters unwrap here so the rest of the crate only
//! ever sees plain records.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::error::ServiceError;

/// Extracts a list of records from a bare array or a `data` envelope.
///
/// # Errors
///
/// Returns [`ServiceError::Fetch`] if the payload has neither shape or its
/// elements do not deserialize into `T`.
///
/// # Examples
///
/// ```
/// use coursedesk::service::envelope::unwrap_list;
///
/// let bare: Vec<u32> = unwrap_list(serde_json::json!([1, 2])).unwrap();
/// let wrapped: Vec<u32> = unwrap_list(serde_json::json!({ "data": [1, 2] })).unwrap();
/// assert_eq!(bare, wrapped);
/// ```
pub fn unwrap_list<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>, ServiceError> {
    let items = match payload {
        Value::Array(_) => payload,
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Array(_)) => data,
            Some(_) => return Err(ServiceError::Fetch(Some("list envelope `data` is not an array".into()))),
            None => return Err(ServiceError::Fetch(Some("list payload has no `data` field".into()))),
        },
        other => {
            return Err(ServiceError::Fetch(Some(format!(
                "unexpected list payload of type {}",
                json_type(&other)
            ))))
        }
    };

    serde_json::from_value(items).map_err(|e| ServiceError::Fetch(Some(format!("malformed list payload: {e}"))))
}

/// Extracts a single record from a bare object or a `data` envelope.
///
/// An object is treated as an envelope only if it has a `data` object and no
/// `id` of its own.
///
/// # Errors
///
/// Returns [`ServiceError::Server`] if the record does not deserialize into `T`.
pub fn unwrap_record<T: DeserializeOwned>(payload: Value) -> Result<T, ServiceError> {
    let record = match payload {
        Value::Object(mut map) if !map.contains_key("id") && map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    serde_json::from_value(record).map_err(|e| ServiceError::server(format!("malformed record payload: {e}")))
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
