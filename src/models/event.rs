use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document in the "events" collection: a shared expense group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub event_id: Option<String>,
    pub name_of_event: Option<String>,
    pub created_by: Option<String>,
    /// Transaction ids booked against this event
    #[serde(default)]
    pub transactions: Vec<String>,
    pub online_amount_of_event: Option<f64>,
    pub offline_amount_of_event: Option<f64>,
    /// User ids
    #[serde(default)]
    pub members: Vec<String>,
    pub currency: Option<String>,
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "super::deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::deserialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}
