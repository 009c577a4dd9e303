use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson};
use serde_json::Value;

use super::{Document, DocumentStore, Filter, MongoDB, StoredDocument};
use crate::utils::{AppError, AppResult};

/// Encodes field data as a BSON document keyed by `_id`.
fn to_bson_document(id: &str, data: &Document) -> AppResult<bson::Document> {
    let mut document = bson::to_document(data)?;
    document.insert("_id", id);
    Ok(document)
}

fn from_bson_document(mut document: bson::Document) -> AppResult<StoredDocument> {
    let id = match document.remove("_id") {
        Some(Bson::String(id)) => id,
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.to_string(),
        None => return Err(AppError::Internal("Stored document has no _id".to_string())),
    };

    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(data) => Ok(StoredDocument { id, data }),
        _ => Err(AppError::Internal(format!("Document {} is not an object", id))),
    }
}

fn to_bson_filter(filter: &Filter) -> AppResult<bson::Document> {
    let filter = match filter {
        Filter::Eq(field, value) => {
            let mut f = bson::Document::new();
            f.insert(field.as_str(), bson::to_bson(value)?);
            f
        }
        Filter::Gt(field, value) => {
            let mut f = bson::Document::new();
            f.insert(field.as_str(), doc! { "$gt": bson::to_bson(value)? });
            f
        }
        Filter::ArrayContains(field, value) => {
            let mut f = bson::Document::new();
            f.insert(
                field.as_str(),
                doc! { "$elemMatch": { "$eq": bson::to_bson(value)? } },
            );
            f
        }
        Filter::IdIn(ids) => doc! { "_id": { "$in": ids.clone() } },
    };
    Ok(filter)
}

#[async_trait]
impl DocumentStore for MongoDB {
    fn new_id(&self) -> String {
        ObjectId::new().to_hex()
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        log::debug!("🔎 get {}/{}", collection, id);

        let found = self
            .collection::<bson::Document>(collection)
            .find_one(doc! { "_id": id })
            .await?;

        found
            .map(|document| from_bson_document(document).map(|stored| stored.data))
            .transpose()
    }

    async fn set(&self, collection: &str, id: &str, data: Document) -> AppResult<()> {
        log::debug!("💾 set {}/{}", collection, id);

        let document = to_bson_document(id, &data)?;
        self.collection::<bson::Document>(collection)
            .replace_one(doc! { "_id": id }, document)
            .upsert(true)
            .await?;

        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, mut fields: Document) -> AppResult<bool> {
        log::debug!("✏️  update {}/{}", collection, id);

        fields.remove("_id");
        if fields.is_empty() {
            // `$set` rejects an empty document
            return Ok(self.get(collection, id).await?.is_some());
        }

        let result = self
            .collection::<bson::Document>(collection)
            .update_one(doc! { "_id": id }, doc! { "$set": bson::to_document(&fields)? })
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool> {
        log::debug!("🗑️  delete {}/{}", collection, id);

        let result = self
            .collection::<bson::Document>(collection)
            .delete_one(doc! { "_id": id })
            .await?;

        Ok(result.deleted_count > 0)
    }

    async fn query(&self, collection: &str, filter: Filter) -> AppResult<Vec<StoredDocument>> {
        log::debug!("🔎 query {} {:?}", collection, filter);

        let mut cursor = self
            .collection::<bson::Document>(collection)
            .find(to_bson_filter(&filter)?)
            .sort(doc! { "_id": 1 })
            .await?;

        let mut documents = Vec::new();
        while let Some(result) = cursor.next().await {
            documents.push(from_bson_document(result?)?);
        }

        Ok(documents)
    }

    async fn ping(&self) -> AppResult<()> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_bson_document_carries_id_and_fields() {
        let data = object(json!({ "userId": "u1", "amount": 12.5, "lastSynced": 1_700_000_000_000i64 }));
        let document = to_bson_document("t1", &data).unwrap();

        assert_eq!(document.get_str("_id").unwrap(), "t1");
        assert_eq!(document.get_str("userId").unwrap(), "u1");
        assert_eq!(document.get_i64("lastSynced").unwrap(), 1_700_000_000_000);
    }

    #[test]
    fn test_from_bson_document_strips_id() {
        let stored = from_bson_document(doc! {
            "_id": "e1",
            "nameOfEvent": "Trip",
            "members": ["u1", "u2"],
            "lastSynced": 1_700_000_000_000i64,
        })
        .unwrap();

        assert_eq!(stored.id, "e1");
        assert!(!stored.data.contains_key("_id"));
        assert_eq!(stored.data["members"], json!(["u1", "u2"]));
        assert_eq!(stored.data["lastSynced"], json!(1_700_000_000_000i64));
    }

    #[test]
    fn test_filters_translate_to_mongo_operators() {
        assert_eq!(
            to_bson_filter(&Filter::greater_than("lastSynced", 5)).unwrap(),
            doc! { "lastSynced": { "$gt": 5i64 } }
        );
        assert_eq!(
            to_bson_filter(&Filter::equals("userId", "u1")).unwrap(),
            doc! { "userId": "u1" }
        );
        assert_eq!(
            to_bson_filter(&Filter::array_contains("members", "u1")).unwrap(),
            doc! { "members": { "$elemMatch": { "$eq": "u1" } } }
        );
        assert_eq!(
            to_bson_filter(&Filter::id_in(["a", "b"])).unwrap(),
            doc! { "_id": { "$in": ["a", "b"] } }
        );
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_round_trip() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/paysync_test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let id = db.new_id();
        db.set("transactions", &id, object(json!({ "userId": "u1" }))).await.unwrap();
        assert!(db.get("transactions", &id).await.unwrap().is_some());
        assert!(db.delete("transactions", &id).await.unwrap());
        assert!(db.get("transactions", &id).await.unwrap().is_none());
    }
}
