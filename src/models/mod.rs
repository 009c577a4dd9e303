pub mod event;
pub mod sync;
pub mod transaction;
pub mod user;

pub use event::*;
pub use sync::{ChangeSet, PullQuery, PushSummary};
pub use transaction::*;
pub use user::*;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    database::Document,
    utils::{AppError, AppResult},
};

/// Serializes a record into the field map written to the store.
pub fn to_document<T: Serialize>(record: &T) -> AppResult<Document> {
    match serde_json::to_value(record)? {
        Value::Object(data) => Ok(data),
        other => Err(AppError::Internal(format!(
            "Record serialized to {} instead of an object",
            other
        ))),
    }
}

/// Maps stored fields back onto a record; unknown fields such as `lastSynced` are ignored.
pub fn from_document<T: DeserializeOwned>(data: Document) -> AppResult<T> {
    Ok(serde_json::from_value(Value::Object(data))?)
}

/// Timestamps arrive either as RFC 3339 strings (REST clients) or as epoch
/// milliseconds (mobile sync pushes).
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| Some(parsed.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
        Value::Number(millis) => millis
            .as_i64()
            .or_else(|| millis.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("Timestamp {} is out of range", millis))),
        other => Err(serde::de::Error::custom(format!(
            "Expected an RFC 3339 string or epoch milliseconds, got {}",
            other
        ))),
    }
}

/// Typed entity stored in its own collection, keyed by a store-generated id.
pub trait Record: Serialize + DeserializeOwned + Send {
    const COLLECTION: &'static str;
    /// Human-readable kind used in error messages
    const KIND: &'static str;

    fn assign_id(&mut self, id: String);
}

impl Record for User {
    const COLLECTION: &'static str = sync::USERS;
    const KIND: &'static str = "User";

    fn assign_id(&mut self, id: String) {
        self.user_id = Some(id);
    }
}

impl Record for Event {
    const COLLECTION: &'static str = sync::EVENTS;
    const KIND: &'static str = "Event";

    fn assign_id(&mut self, id: String) {
        self.event_id = Some(id);
    }
}

impl Record for Transaction {
    const COLLECTION: &'static str = sync::TRANSACTIONS;
    const KIND: &'static str = "Transaction";

    fn assign_id(&mut self, id: String) {
        self.transaction_id = Some(id);
    }
}
