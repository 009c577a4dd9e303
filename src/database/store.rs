use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;

use crate::utils::AppResult;

/// Field map of a stored document, without its identifier.
pub type Document = serde_json::Map<String, Value>;

/// A document as returned by a query: identifier plus field data.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

/// Query filters supported by every store backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `field == value`
    Eq(String, Value),
    /// `field > value` (numbers compare numerically, strings lexicographically)
    Gt(String, Value),
    /// `field` is an array holding `value`
    ArrayContains(String, Value),
    /// document id is one of the given ids
    IdIn(Vec<String>),
}

impl Filter {
    pub fn equals(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    pub fn greater_than(field: &str, value: impl Into<Value>) -> Self {
        Filter::Gt(field.to_string(), value.into())
    }

    pub fn array_contains(field: &str, value: impl Into<Value>) -> Self {
        Filter::ArrayContains(field.to_string(), value.into())
    }

    pub fn id_in<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::IdIn(ids.into_iter().map(Into::into).collect())
    }

    /// Evaluates the filter against a document held in process.
    pub fn matches(&self, id: &str, data: &Document) -> bool {
        match self {
            Filter::Eq(field, expected) => data
                .get(field)
                .map(|actual| values_equal(actual, expected))
                .unwrap_or(false),
            Filter::Gt(field, bound) => data
                .get(field)
                .and_then(|actual| compare_values(actual, bound))
                .map(|ord| ord == Ordering::Greater)
                .unwrap_or(false),
            Filter::ArrayContains(field, needle) => match data.get(field) {
                Some(Value::Array(items)) => items.iter().any(|item| values_equal(item, needle)),
                _ => false,
            },
            Filter::IdIn(ids) => ids.iter().any(|candidate| candidate == id),
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_values(a, b) == Some(Ordering::Equal),
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Collection/document store the services talk to.
///
/// Each call is one round trip and is atomic for the single document it
/// touches. Nothing here spans documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fresh identifier for a document about to be created.
    fn new_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>>;

    /// Creates or fully overwrites the document.
    async fn set(&self, collection: &str, id: &str, data: Document) -> AppResult<()>;

    /// Merges `fields` into an existing document. Returns `false` when the
    /// document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> AppResult<bool>;

    /// Returns `false` when there was nothing to delete.
    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool>;

    /// Documents matching `filter`, ordered by id.
    async fn query(&self, collection: &str, filter: Filter) -> AppResult<Vec<StoredDocument>>;

    /// Connectivity check used by `/health`.
    async fn ping(&self) -> AppResult<()>;
}
