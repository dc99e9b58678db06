//! Decoding raw JSON into typed records.
//!
//! Resource wrappers receive [`serde_json::Value`]s from the request engine.
//! The helpers here turn them into typed records and report a malformed
//! payload as an [`ApiError`] instead of producing an ill-typed value.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::ApiError;

/// Decodes a JSON value into `T`.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] naming `T` if the value does not match.
///
/// # Example
///
/// ```rust
/// use keap_api::rest::decode;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Tag {
///     id: u64,
///     name: String,
/// }
///
/// let tag: Tag = decode(json!({"id": 7, "name": "VIP"})).unwrap();
/// assert_eq!(tag.id, 7);
///
/// let result = decode::<Tag>(json!({"id": "seven"}));
/// assert!(result.is_err());
/// ```
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        target: std::any::type_name::<T>(),
        source,
    })
}

/// Decodes the field `key` of a JSON object into `T`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidResponse`] if `value` is not an object or has
/// no field `key`, and [`ApiError::Decode`] if the field does not match `T`.
///
/// # Example
///
/// ```rust
/// use keap_api::rest::decode_field;
/// use serde_json::json;
///
/// let response = json!({"tags": [1, 2, 3], "count": 3});
/// let ids: Vec<u64> = decode_field(&response, "tags").unwrap();
/// assert_eq!(ids, vec![1, 2, 3]);
/// ```
pub fn decode_field<T: DeserializeOwned>(value: &Value, key: &str) -> Result<T, ApiError> {
    let object = value
        .as_object()
        .ok_or_else(|| ApiError::invalid_response(format!("expected an object with '{key}'")))?;
    let field = object
        .get(key)
        .ok_or_else(|| ApiError::invalid_response(format!("missing '{key}'")))?;
    decode(field.clone())
}
