//! Document store backends.

mod memory;
mod rest;
pub mod value;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::types::{Fields, Record, Result};
use async_trait::async_trait;

/// Capability interface to the document store.
///
/// Durability, indexing, and consistency all live behind this seam; the
/// client only ever issues these five calls. All operations suspend on
/// the store's round trip and nothing else.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document by id. Absent documents are `Ok(None)`.
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Record>>;

    /// Read all documents in a collection as a materialized list.
    async fn list_documents(&self, collection: &str) -> Result<Vec<Record>>;

    /// Create a document with a store-generated id; returns that id.
    async fn put_document(&self, collection: &str, fields: Fields) -> Result<String>;

    /// Merge the given fields into an existing document. There is no
    /// existence pre-check; a missing target fails with the store's own
    /// error.
    async fn update_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Delete a document. Deleting an absent id succeeds.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<()>;
}
