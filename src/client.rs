//! Client facade over a document store.

use crate::config::FireConfig;
use crate::query::{Command, QueryOutcome};
use crate::store::{DocumentStore, RestStore};
use crate::types::{Fields, ParseError, Record, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Async client for a hosted document store.
///
/// Owns the store handle and exposes the CRUD operations plus the
/// sentence dispatcher. Holds no other cross-call state, so one client
/// can serve any number of concurrent calls.
pub struct Fireclient {
    config: Option<FireConfig>,
    store: Arc<dyn DocumentStore>,
}

impl Fireclient {
    /// Connect to the hosted store described by the config.
    pub fn connect(config: FireConfig) -> Result<Self> {
        let store = RestStore::new(&config)?;
        Ok(Self {
            config: Some(config),
            store: Arc::new(store),
        })
    }

    /// Build a client over any store backend (e.g. a [`MemoryStore`]
    /// in tests).
    ///
    /// [`MemoryStore`]: crate::store::MemoryStore
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config: None,
            store,
        }
    }

    /// Crate version string.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Connection config, when the client was built from one.
    pub fn config(&self) -> Option<&FireConfig> {
        self.config.as_ref()
    }

    /// Underlying store handle.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Read a single record by id.
    ///
    /// A missing document degrades to `Ok(None)` after a log line.
    pub async fn fetch_one(&self, collection: &str, id: &str) -> Result<Option<Record>> {
        let record = self.store.get_document(collection, id).await?;
        if record.is_none() {
            warn!(collection, id, "document does not exist");
        }
        Ok(record)
    }

    /// Read all records of a collection as a materialized list.
    ///
    /// An empty collection is an empty vec, never an error.
    pub async fn fetch_all(&self, collection: &str) -> Result<Vec<Record>> {
        self.store.list_documents(collection).await
    }

    /// Project one field across all records of a collection.
    ///
    /// A record without the field contributes `None` at its position.
    pub async fn fetch_field(&self, collection: &str, field: &str) -> Result<Vec<Option<Value>>> {
        let records = self.store.list_documents(collection).await?;
        Ok(records
            .into_iter()
            .map(|record| record.fields.get(field).cloned())
            .collect())
    }

    /// Create a record; returns the store-assigned id.
    pub async fn insert(&self, collection: &str, fields: Fields) -> Result<String> {
        match self.store.put_document(collection, fields).await {
            Ok(id) => Ok(id),
            Err(err) => {
                error!(collection, error = %err, "failed to add document");
                Err(err)
            }
        }
    }

    /// Merge fields into an existing record. No existence pre-check; a
    /// missing target fails with the store's own error.
    pub async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        match self.store.update_document(collection, id, fields).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(collection, id, error = %err, "failed to update document");
                Err(err)
            }
        }
    }

    /// Delete a record. Deleting an absent id succeeds.
    pub async fn remove(&self, collection: &str, id: &str) -> Result<()> {
        match self.store.delete_document(collection, id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(collection, id, error = %err, "failed to delete document");
                Err(err)
            }
        }
    }

    /// Dispatch a pseudo-query sentence to the matching CRUD operation.
    ///
    /// `insert` and `update` sentences carry their fields in `payload`;
    /// the other verbs ignore it. Malformed sentences come back as
    /// [`ParseError`] values rather than panics or silent empty results.
    pub async fn query(&self, sentence: &str, payload: Option<Fields>) -> Result<QueryOutcome> {
        let command = match Command::parse(sentence) {
            Ok(command) => command,
            Err(err) => {
                error!(sentence, error = %err, "rejected dispatch sentence");
                return Err(err.into());
            }
        };
        debug!(sentence, ?command, "dispatching");

        match command {
            Command::SelectAll { collection } => {
                Ok(QueryOutcome::Records(self.fetch_all(&collection).await?))
            }
            Command::SelectOne { collection, id } => {
                Ok(QueryOutcome::Record(self.fetch_one(&collection, &id).await?))
            }
            Command::Insert { collection } => {
                let fields = payload.ok_or(ParseError::MissingPayload("insert"))?;
                Ok(QueryOutcome::Inserted(self.insert(&collection, fields).await?))
            }
            Command::Update { collection, id } => {
                let fields = payload.ok_or(ParseError::MissingPayload("update"))?;
                self.update(&collection, &id, fields).await?;
                Ok(QueryOutcome::Done)
            }
            Command::Delete { collection, id } => {
                self.remove(&collection, &id).await?;
                Ok(QueryOutcome::Done)
            }
        }
    }
}
