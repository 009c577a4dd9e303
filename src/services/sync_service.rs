// ==================== INCREMENTAL SYNC ====================
// Push: client batch -> store, every document stamped with `lastSynced`.
// Pull: every document with `lastSynced` past the client's watermark, plus the
// events referenced by any returned user.

use std::collections::{BTreeMap, HashSet};

use crate::{
    database::{Document, DocumentStore, Filter, StoredDocument},
    models::{
        event_ids_of, event_ids_well_formed, normalize_event_ids,
        sync::{
            stamp_synced, strip_sync_metadata, EVENTS, LAST_SYNCED, SYNC_COLLECTIONS,
            TRANSACTIONS, USERS,
        },
        ChangeSet, PushSummary,
    },
    utils::{now_millis, AppError, AppResult},
};

/// Upper bound on ids per id-in query
const ID_IN_BATCH: usize = 30;

fn validate_key(kind: &str, key: &str) -> AppResult<()> {
    if key.is_empty() || key.contains(['$', '.', '/']) {
        return Err(AppError::InvalidRequest(format!(
            "Invalid {} name '{}'",
            kind, key
        )));
    }
    Ok(())
}

/// Shapes a stored document for a response: no bookkeeping fields, user
/// event ids always in the list encoding.
fn outgoing(collection: &str, mut data: Document) -> Document {
    strip_sync_metadata(&mut data);
    if collection == USERS {
        normalize_event_ids(&mut data);
    }
    data
}

/// Writes every document of the batch. Not transactional: the first failing
/// write aborts the batch and earlier writes stay in place.
pub async fn push_changes(store: &dyn DocumentStore, changes: ChangeSet) -> AppResult<PushSummary> {
    for (collection, documents) in &changes {
        validate_key("collection", collection)?;
        for (id, data) in documents {
            validate_key("document", id)?;
            if collection == USERS && !event_ids_well_formed(data) {
                return Err(AppError::InvalidRequest(format!(
                    "User {} has malformed events (expected a list of ids or a comma-separated string)",
                    id
                )));
            }
        }
    }

    let synced_at = now_millis();
    let mut written = 0;

    for (collection, documents) in changes {
        for (id, mut data) in documents {
            data.remove("_id");
            if collection == USERS {
                normalize_event_ids(&mut data);
            }
            stamp_synced(&mut data, synced_at);

            store.set(&collection, &id, data).await?;
            written += 1;
        }
    }

    log::info!("✅ Pushed {} documents (lastSynced={})", written, synced_at);

    Ok(PushSummary {
        success: true,
        documents_written: written,
        last_synced: synced_at,
    })
}

/// Fetches events by id with batched id-in queries. Unknown ids are skipped.
async fn fetch_events(store: &dyn DocumentStore, ids: &[String]) -> AppResult<Vec<StoredDocument>> {
    let mut events = Vec::with_capacity(ids.len());
    for batch in ids.chunks(ID_IN_BATCH) {
        events.extend(store.query(EVENTS, Filter::id_in(batch.iter().cloned())).await?);
    }
    Ok(events)
}

/// Every document changed after `since` (epoch ms), keyed by collection.
/// Collections without changes are left out.
pub async fn pull_changes(store: &dyn DocumentStore, since: i64) -> AppResult<ChangeSet> {
    let mut changes = ChangeSet::new();

    for collection in SYNC_COLLECTIONS {
        let documents = store
            .query(collection, Filter::greater_than(LAST_SYNCED, since))
            .await?;

        if documents.is_empty() {
            continue;
        }

        changes.insert(
            collection.to_string(),
            documents
                .into_iter()
                .map(|doc| (doc.id, outgoing(collection, doc.data)))
                .collect(),
        );
    }

    // One level of expansion: events referenced by returned users
    let already_present: HashSet<&String> = changes
        .get(EVENTS)
        .map(|events| events.keys().collect())
        .unwrap_or_default();

    let mut referenced: Vec<String> = Vec::new();
    if let Some(users) = changes.get(USERS) {
        for user in users.values() {
            for id in event_ids_of(user) {
                if !already_present.contains(&id) && !referenced.contains(&id) {
                    referenced.push(id);
                }
            }
        }
    }

    if !referenced.is_empty() {
        let expanded = fetch_events(store, &referenced).await?;
        let events = changes.entry(EVENTS.to_string()).or_default();
        for doc in expanded {
            events.insert(doc.id, outgoing(EVENTS, doc.data));
        }
    }

    log::info!(
        "📤 Pull since {}: {}",
        since,
        changes
            .iter()
            .map(|(collection, docs)| format!("{}={}", collection, docs.len()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(changes)
}

/// The user with their events and transactions, keyed by collection name.
pub async fn get_user_bundle(store: &dyn DocumentStore, user_id: &str) -> AppResult<ChangeSet> {
    let user = store
        .get(USERS, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
    let user = outgoing(USERS, user);

    let event_ids = event_ids_of(&user);
    let events: BTreeMap<String, Document> = fetch_events(store, &event_ids)
        .await?
        .into_iter()
        .map(|doc| (doc.id, outgoing(EVENTS, doc.data)))
        .collect();

    let transactions: BTreeMap<String, Document> = store
        .query(TRANSACTIONS, Filter::equals("userId", user_id))
        .await?
        .into_iter()
        .map(|doc| (doc.id, outgoing(TRANSACTIONS, doc.data)))
        .collect();

    log::info!(
        "📦 Bundle for user {}: {} events, {} transactions",
        user_id,
        events.len(),
        transactions.len()
    );

    let mut bundle = ChangeSet::new();
    bundle.insert(USERS.to_string(), BTreeMap::from([(user_id.to_string(), user)]));
    if !events.is_empty() {
        bundle.insert(EVENTS.to_string(), events);
    }
    if !transactions.is_empty() {
        bundle.insert(TRANSACTIONS.to_string(), transactions);
    }

    Ok(bundle)
}
