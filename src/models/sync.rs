use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::database::Document;

/// Server-assigned watermark (epoch milliseconds) carried by every stored document.
pub const LAST_SYNCED: &str = "lastSynced";

pub const USERS: &str = "users";
pub const EVENTS: &str = "events";
pub const TRANSACTIONS: &str = "transactions";
pub const SAVINGS_GOALS: &str = "savings_goals";

/// Collections scanned by an incremental pull, in response order.
pub const SYNC_COLLECTIONS: [&str; 4] = [USERS, EVENTS, TRANSACTIONS, SAVINGS_GOALS];

/// Collection name -> document id -> fields
pub type ChangeSet = BTreeMap<String, BTreeMap<String, Document>>;

#[derive(Debug, Deserialize)]
pub struct PullQuery {
    #[serde(rename = "lastSyncTimestamp")]
    pub last_sync_timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushSummary {
    pub success: bool,
    pub documents_written: usize,
    /// Watermark stamped on every document of the batch
    pub last_synced: i64,
}

pub fn stamp_synced(data: &mut Document, now_ms: i64) {
    data.insert(LAST_SYNCED.to_string(), now_ms.into());
}

/// Removes server bookkeeping before a document leaves the service.
pub fn strip_sync_metadata(data: &mut Document) {
    data.remove(LAST_SYNCED);
    data.remove("_id");
}
