use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::database::Document;

pub const EVENTS_FIELD: &str = "events";

/// Document in the "users" collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    pub profile_image_url: Option<String>,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default)]
    pub online_amount: f64,
    #[serde(default)]
    pub offline_amount: f64,
    /// Ids of the events the user belongs to. Older clients store this as a
    /// comma-separated string; both encodings decode to the same list.
    #[serde(default, deserialize_with = "deserialize_event_ids")]
    pub events: Vec<String>,
    pub default_event_id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::deserialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preferences: HashMap<String, bool>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Partial profile update, merged field by field into the stored user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<HashMap<String, bool>>,
}

fn deserialize_event_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null | Value::String(_) | Value::Array(_) => Ok(event_ids_from_value(&value)),
        _ => Err(serde::de::Error::custom(
            "Expected a list or a comma-separated string of event ids",
        )),
    }
}

/// Decodes either encoding of a user's `events` field into an ordered,
/// duplicate-free list of ids. Anything else decodes to an empty list.
pub fn event_ids_from_value(value: &Value) -> Vec<String> {
    let candidates: Vec<&str> = match value {
        Value::String(joined) => joined.split(',').collect(),
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };

    let mut ids: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates.into_iter().map(str::trim) {
        if !candidate.is_empty() && !ids.iter().any(|id| id == candidate) {
            ids.push(candidate.to_string());
        }
    }
    ids
}

/// Event ids referenced by a raw user document.
pub fn event_ids_of(user: &Document) -> Vec<String> {
    user.get(EVENTS_FIELD)
        .map(event_ids_from_value)
        .unwrap_or_default()
}

/// True when a raw user document's `events` field is absent, null, a string
/// or a list of strings.
pub fn event_ids_well_formed(user: &Document) -> bool {
    match user.get(EVENTS_FIELD) {
        None | Some(Value::Null) | Some(Value::String(_)) => true,
        Some(Value::Array(items)) => items.iter().all(Value::is_string),
        Some(_) => false,
    }
}

/// Rewrites a comma-separated `events` string in the list encoding. Other
/// shapes are left as they are.
pub fn normalize_event_ids(user: &mut Document) {
    if let Some(value) = user.get_mut(EVENTS_FIELD) {
        if value.is_string() {
            let ids = event_ids_from_value(value);
            *value = Value::from(ids);
        }
    }
}
