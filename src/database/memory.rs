use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use super::{Document, DocumentStore, Filter, StoredDocument};
use crate::utils::{AppError, AppResult};

type Collections = HashMap<String, BTreeMap<String, Document>>;

/// In-process document store for tests and `STORE_BACKEND=memory` runs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
    /// Remaining writes before the store starts failing; `None` means unlimited.
    write_budget: Arc<Mutex<Option<usize>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every write after the next `writes` fail, to exercise partial-failure paths.
    #[cfg(test)]
    pub fn fail_after_writes(&self, writes: usize) {
        if let Ok(mut budget) = self.write_budget.lock() {
            *budget = Some(writes);
        }
    }

    fn take_write(&self) -> AppResult<()> {
        let mut budget = self
            .write_budget
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))?;

        match budget.as_mut() {
            Some(0) => Err(AppError::Upstream("memory store write rejected".to_string())),
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, data: Document) -> AppResult<()> {
        self.take_write()?;
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> AppResult<bool> {
        self.take_write()?;
        let mut collections = self.collections.write().await;
        match collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(id))
        {
            Some(existing) => {
                existing.extend(fields);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool> {
        self.take_write()?;
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|documents| documents.remove(id))
            .is_some())
    }

    async fn query(&self, collection: &str, filter: Filter) -> AppResult<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|(id, data)| filter.matches(id, data))
            .map(|(id, data)| StoredDocument {
                id: id.clone(),
                data: data.clone(),
            })
            .collect())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
