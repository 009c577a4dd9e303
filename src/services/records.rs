// Store round trips shared by the per-entity services.
// Every write stamps `lastSynced` so entity edits show up in incremental pulls.

use crate::{
    database::{DocumentStore, Filter},
    models::{from_document, sync::stamp_synced, to_document, Record},
    utils::{now_millis, AppError, AppResult},
};

fn not_found<R: Record>(id: &str) -> AppError {
    AppError::NotFound(format!("{} {} not found", R::KIND, id))
}

/// Full overwrite of the document `id` with `record`.
async fn put<R: Record>(store: &dyn DocumentStore, id: &str, record: &R) -> AppResult<()> {
    let mut data = to_document(record)?;
    stamp_synced(&mut data, now_millis());
    store.set(R::COLLECTION, id, data).await
}

/// Assigns a fresh id, writes the full record and returns it.
pub async fn insert<R: Record>(store: &dyn DocumentStore, mut record: R) -> AppResult<R> {
    let id = store.new_id();
    record.assign_id(id.clone());
    put(store, &id, &record).await?;
    Ok(record)
}

pub async fn fetch<R: Record>(store: &dyn DocumentStore, id: &str) -> AppResult<R> {
    let data = store
        .get(R::COLLECTION, id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;

    let mut record: R = from_document(data)?;
    record.assign_id(id.to_string());
    Ok(record)
}

/// Overwrites an existing document; the path id wins over any id in the body.
pub async fn replace<R: Record>(store: &dyn DocumentStore, id: &str, mut record: R) -> AppResult<R> {
    if store.get(R::COLLECTION, id).await?.is_none() {
        return Err(not_found::<R>(id));
    }

    record.assign_id(id.to_string());
    put(store, id, &record).await?;
    Ok(record)
}

pub async fn remove<R: Record>(store: &dyn DocumentStore, id: &str) -> AppResult<()> {
    if store.delete(R::COLLECTION, id).await? {
        Ok(())
    } else {
        Err(not_found::<R>(id))
    }
}

pub async fn find<R: Record>(store: &dyn DocumentStore, filter: Filter) -> AppResult<Vec<R>> {
    store
        .query(R::COLLECTION, filter)
        .await?
        .into_iter()
        .map(|stored| -> AppResult<R> {
            let mut record: R = from_document(stored.data)?;
            record.assign_id(stored.id);
            Ok(record)
        })
        .collect()
}
