//! Hosted store backend over the REST wire protocol.

use crate::config::FireConfig;
use crate::store::{value, DocumentStore};
use crate::types::{ClientError, Fields, Record, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Hosted store API base URL.
const API_BASE: &str = "https://firestore.googleapis.com/v1";

/// One document as it appears on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDocument {
    /// Full resource name; the document id is the last path segment.
    name: String,

    #[serde(default)]
    fields: serde_json::Map<String, serde_json::Value>,

    create_time: Option<DateTime<Utc>>,
    update_time: Option<DateTime<Utc>>,
}

impl WireDocument {
    fn into_record(self) -> Record {
        let id = self.name.rsplit('/').next().unwrap_or_default().to_string();
        Record {
            id,
            fields: value::decode_fields(&self.fields),
            create_time: self.create_time,
            update_time: self.update_time,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<WireDocument>,
    next_page_token: Option<String>,
}

/// `DocumentStore` backend talking to the hosted database over HTTPS.
///
/// Authenticates with the project API key as a query parameter. No
/// retries or timeouts beyond the HTTP client's defaults; a hung round
/// trip hangs the awaiting caller.
pub struct RestStore {
    client: Client,
    project_id: String,
    api_key: String,
}

impl RestStore {
    /// Create a backend for the configured project.
    pub fn new(config: &FireConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: Client::new(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            API_BASE, self.project_id, collection
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    /// Turn a non-success response into a store error carrying the body.
    async fn check(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(ClientError::Store { status, message })
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Record>> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: WireDocument = Self::check(response).await?.json().await?;
        Ok(Some(document.into_record()))
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(self.collection_url(collection))
                .query(&[("key", self.api_key.as_str())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListDocumentsResponse =
                Self::check(request.send().await?).await?.json().await?;
            records.extend(page.documents.into_iter().map(WireDocument::into_record));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(records)
    }

    async fn put_document(&self, collection: &str, fields: Fields) -> Result<String> {
        let response = self
            .client
            .post(self.collection_url(collection))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "fields": value::encode_fields(&fields) }))
            .send()
            .await?;

        let document: WireDocument = Self::check(response).await?.json().await?;
        Ok(document.into_record().id)
    }

    async fn update_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        // updateMask limits the write to the supplied fields (merge, not replace)
        let mut params: Vec<(&str, String)> = vec![("key", self.api_key.clone())];
        for name in fields.keys() {
            params.push(("updateMask.fieldPaths", name.clone()));
        }

        let response = self
            .client
            .patch(self.document_url(collection, id))
            .query(&params)
            .json(&json!({ "fields": value::encode_fields(&fields) }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        // the hosted store reports success even when the id is absent
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}
