//! Process-local `DocumentStore` backend.

use crate::store::DocumentStore;
use crate::types::{ClientError, Fields, Record, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredDocument {
    fields: Fields,
    create_time: DateTime<Utc>,
    update_time: DateTime<Utc>,
}

/// In-memory backend with the hosted store's observable semantics:
/// store-generated ids, merge updates, idempotent deletes.
///
/// Useful as a test double and for offline runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, DashMap<String, StoredDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(id: &str, document: &StoredDocument) -> Record {
        Record {
            id: id.to_string(),
            fields: document.fields.clone(),
            create_time: Some(document.create_time),
            update_time: Some(document.update_time),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Record>> {
        Ok(self.collections.get(collection).and_then(|documents| {
            documents
                .get(id)
                .map(|document| Self::record(id, &document))
        }))
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Record>> {
        let mut records: Vec<Record> = match self.collections.get(collection) {
            Some(documents) => documents
                .iter()
                .map(|entry| Self::record(entry.key(), entry.value()))
                .collect(),
            None => Vec::new(),
        };

        // map iteration order is arbitrary; sort so repeated listings
        // of unchanged data come back in the same order
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    async fn put_document(&self, collection: &str, fields: Fields) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        let now = Utc::now();

        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(
                id.clone(),
                StoredDocument {
                    fields,
                    create_time: now,
                    update_time: now,
                },
            );

        Ok(id)
    }

    async fn update_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let documents = self
            .collections
            .get(collection)
            .ok_or_else(|| missing_target(collection, id))?;
        let mut document = documents
            .get_mut(id)
            .ok_or_else(|| missing_target(collection, id))?;

        for (name, value) in fields {
            document.fields.insert(name, value);
        }
        document.update_time = Utc::now();

        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        if let Some(documents) = self.collections.get(collection) {
            documents.remove(id);
        }
        Ok(())
    }
}

fn missing_target(collection: &str, id: &str) -> ClientError {
    ClientError::Store {
        status: 404,
        message: format!("no document to update: {}/{}", collection, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_put_assigns_store_id() {
        let store = MemoryStore::new();

        let id = store
            .put_document("books", fields(json!({"title": "Dune"})))
            .await
            .unwrap();

        assert!(!id.is_empty());
        let record = store.get_document("books", &id).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert!(record.create_time.is_some());
    }

    #[tokio::test]
    async fn test_update_merges_into_existing_fields() {
        let store = MemoryStore::new();
        let id = store
            .put_document("books", fields(json!({"title": "Dune", "year": 1965})))
            .await
            .unwrap();

        store
            .update_document("books", &id, fields(json!({"year": 1966})))
            .await
            .unwrap();

        let record = store.get_document("books", &id).await.unwrap().unwrap();
        assert_eq!(record.fields["title"], json!("Dune"));
        assert_eq!(record.fields["year"], json!(1966));
    }

    #[tokio::test]
    async fn test_update_missing_target_fails() {
        let store = MemoryStore::new();

        let result = store
            .update_document("books", "nope", fields(json!({"year": 1966})))
            .await;

        assert!(matches!(result, Err(ClientError::Store { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = store
            .put_document("books", fields(json!({"title": "Dune"})))
            .await
            .unwrap();

        store.delete_document("books", &id).await.unwrap();
        store.delete_document("books", &id).await.unwrap();
        store.delete_document("ghosts", "nope").await.unwrap();

        assert!(store.get_document("books", &id).await.unwrap().is_none());
    }
}
