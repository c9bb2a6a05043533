//! Mapping of raw API payloads onto typed entities.
//!
//! The API sends camelCase keys. Every payload goes through the same pipeline:
//!
//! 1. [`normalize_keys`] rewrites every object key to snake_case and drops
//!    `null` members, so they fall back to the field default.
//! 2. [`FromPayload::reshape`] applies the entity's own rules (merging groups,
//!    flattening or contracting sub-objects) with the helpers of this module.
//! 3. serde fills the entity. Entities declare `#[serde(default)]`, so a missing
//!    key keeps its default and an unknown key is ignored.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

/// Converts a camelCase key to snake_case.
///
/// A separator is inserted before every uppercase letter that is not the first
/// character, then the key is lowercased. Leading digits are kept as they are,
/// so `3vs3Victories` becomes `3vs3_victories`.
///
/// # Examples
///
/// ```
/// # use bs_api::normalize_key;
/// assert_eq!(normalize_key("badgeId"), "badge_id");
/// ```
pub fn normalize_key(key: &str) -> String {
    let mut normalized = String::with_capacity(key.len() + 4);
    for (index, c) in key.chars().enumerate() {
        if c.is_uppercase() {
            if index > 0 {
                normalized.push('_');
            }
            normalized.extend(c.to_lowercase());
        } else {
            normalized.push(c);
        }
    }
    normalized
}

/// Recursively normalizes every object key of `value` and drops `null` members.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (normalize_key(&k), normalize_keys(v)))
                .collect(),
        ),
        Value::Array(values) => Value::Array(values.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Moves the members of each nested group into the top-level record.
///
/// Groups are applied in the given order, so on a key collision the last group
/// wins over earlier groups and over top-level keys.
pub fn merge_groups(map: &mut Map<String, Value>, groups: &[&str]) -> ApiResult<()> {
    for group in groups {
        if let Some(members) = take_object(map, group)? {
            map.extend(members);
        }
    }
    Ok(())
}

/// Replaces the sub-object under `key` by its members renamed with `prefix`.
pub fn flatten_prefixed(map: &mut Map<String, Value>, key: &str, prefix: &str) -> ApiResult<()> {
    if let Some(members) = take_object(map, key)? {
        for (k, v) in members {
            map.insert(format!("{}{}", prefix, k), v);
        }
    }
    Ok(())
}

/// Replaces the sub-object under `key` by its single member `inner`, stored
/// under `target`. The other members of the sub-object are lost.
pub fn contract(
    map: &mut Map<String, Value>,
    key: &str,
    inner: &str,
    target: &str,
) -> ApiResult<()> {
    if let Some(mut members) = take_object(map, key)? {
        if let Some(v) = members.remove(inner) {
            map.insert(target.to_string(), v);
        }
    }
    Ok(())
}

fn take_object(map: &mut Map<String, Value>, key: &str) -> ApiResult<Option<Map<String, Value>>> {
    match map.remove(key) {
        None => Ok(None),
        Some(Value::Object(members)) => Ok(Some(members)),
        Some(other) => Err(ApiError::ParseFailure(format!(
            "expected `{}` to be an object, got {}",
            key, other
        ))),
    }
}

/// Construction of an entity from one JSON payload.
pub trait FromPayload: DeserializeOwned {
    /// Entity specific rules, applied to the normalized payload.
    fn reshape(payload: Map<String, Value>) -> ApiResult<Map<String, Value>> {
        Ok(payload)
    }

    /// Builds the entity from a raw payload.
    fn from_payload(payload: Value) -> ApiResult<Self> {
        let Value::Object(map) = normalize_keys(payload) else {
            return Err(ApiError::ParseFailure(format!(
                "expected a json object for {}",
                std::any::type_name::<Self>()
            )));
        };

        let map = Self::reshape(map)?;
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

/// Extracts the `items` array of a list response.
pub fn items(payload: Value) -> ApiResult<Vec<Value>> {
    match payload {
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(ApiError::ParseFailure(
                "expected an `items` array in list response".to_string(),
            )),
        },
        other => Err(ApiError::ParseFailure(format!(
            "expected a list response, got {}",
            other
        ))),
    }
}

/// Builds one entity per element of the `items` array of a list response.
pub fn from_items<T: FromPayload>(payload: Value) -> ApiResult<Vec<T>> {
    items(payload)?.into_iter().map(T::from_payload).collect()
}
