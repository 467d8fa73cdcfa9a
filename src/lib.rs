//! Fireclient - async client for Firestore-style hosted document stores.

pub mod client;
pub mod config;
pub mod query;
pub mod store;
pub mod types;

// Re-export main types
pub use client::Fireclient;
pub use config::FireConfig;
pub use query::{Command, QueryOutcome};
pub use store::{DocumentStore, MemoryStore, RestStore};
pub use types::{ClientError, Fields, ParseError, Record, Result};
