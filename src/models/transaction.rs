use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document in the "transactions" collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub user_id: Option<String>,
    pub event_id: Option<String>,
    /// Paid online (card, transfer) vs. cash
    pub is_online: Option<bool>,
    /// Money in (true) or out (false)
    pub is_credit: Option<bool>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub payment_method: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_timestamp")]
    pub date_time: Option<DateTime<Utc>>,
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_url: Option<String>,
    pub recurring: Option<bool>,
    pub recurring_type: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::deserialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flags_use_is_prefix_on_the_wire() {
        let tx: Transaction = serde_json::from_value(json!({
            "userId": "u1",
            "amount": 42.0,
            "isOnline": true,
            "isCredit": false,
            "dateTime": "2024-03-01T12:30:00Z"
        }))
        .unwrap();

        assert_eq!(tx.is_online, Some(true));
        assert_eq!(tx.is_credit, Some(false));
        assert!(tx.date_time.is_some());

        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["isOnline"], true);
        assert!(value.get("imageUrl").is_none());
    }

    #[test]
    fn test_sparse_documents_decode() {
        let tx: Transaction = serde_json::from_value(json!({ "note": "cash tip" })).unwrap();
        assert_eq!(tx.user_id, None);
        assert_eq!(tx.amount, None);
        assert_eq!(tx.note.as_deref(), Some("cash tip"));
    }

    #[test]
    fn test_date_time_accepts_epoch_millis() {
        let tx: Transaction = serde_json::from_value(json!({
            "userId": "u1",
            "dateTime": 1_700_000_000_000i64,
            "createdAt": null
        }))
        .unwrap();

        let date_time = tx.date_time.unwrap();
        assert_eq!(date_time.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(tx.created_at, None);

        assert!(serde_json::from_value::<Transaction>(json!({ "dateTime": true })).is_err());
    }
}
