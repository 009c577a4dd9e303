pub mod memory;
pub mod mongo;
pub mod store;

pub use memory::MemoryStore;
pub use store::{Document, DocumentStore, Filter, StoredDocument};

use crate::{models::sync::{LAST_SYNCED, SYNC_COLLECTIONS}, utils::AppResult};
use mongodb::{Client, Collection, Database};
use std::time::Duration;

const DEFAULT_DB_NAME: &str = "paysync";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> AppResult<Self> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        // Database name comes from the URI path, e.g. mongodb://host:27017/paysync
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("📊 Using database '{}'", db_name);

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes behind the watermark and foreign-key queries.
    async fn ensure_indexes(&self) -> AppResult<()> {
        use mongodb::bson::Document;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let mut indexes: Vec<(&str, &str)> = SYNC_COLLECTIONS
            .iter()
            .map(|collection| (*collection, LAST_SYNCED))
            .collect();
        indexes.extend([
            ("transactions", "userId"),
            ("transactions", "eventId"),
            ("events", "members"),
            ("events", "createdBy"),
        ]);

        for (collection, field) in indexes {
            let mut keys = Document::new();
            keys.insert(field, 1);
            let index = IndexModel::builder().keys(keys).build();

            match self
                .collection::<mongodb::bson::Document>(collection)
                .create_index(index)
                .await
            {
                Ok(_) => log::info!("   ✅ Index created: {}({})", collection, field),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
