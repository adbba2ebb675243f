//! Appwrite REST gateway for the registration collection
//!
//! Documents live in one collection of one database; ids and credentials are
//! injected at construction. Failure classification happens here, at the
//! wire, so the services above only ever see [`StoreError`] kinds.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{DocumentList, DocumentStore, Query, StoreError};
use crate::models::Registration;

/// Wire timeout for store calls. A remote timeout surfaces as a plain
/// remote error; the service adds no timeout of its own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for one Appwrite collection
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub collection_id: String,
}

/// Appwrite-backed document store
pub struct AppwriteStore {
    client: reqwest::Client,
    documents_url: String,
}

impl AppwriteStore {
    pub fn new(config: AppwriteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Appwrite-Project",
            HeaderValue::from_str(&config.project_id).context("Invalid Appwrite project id")?,
        );
        headers.insert(
            "X-Appwrite-Key",
            HeaderValue::from_str(&config.api_key).context("Invalid Appwrite API key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .context("Failed to build store HTTP client")?;

        let documents_url = format!(
            "{}/databases/{}/collections/{}/documents",
            config.endpoint.trim_end_matches('/'),
            config.database_id,
            config.collection_id
        );

        Ok(Self {
            client,
            documents_url,
        })
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url, id)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Remote(err.to_string())
    }
}

/// Error payload the store returns on non-2xx responses
#[derive(Debug, Default, Deserialize)]
struct RemoteErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
}

/// Envelope of a document list response
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    documents: Vec<Registration>,
}

/// Map a non-2xx store response onto a typed error kind.
fn classify(status: u16, body: RemoteErrorBody) -> StoreError {
    if status == 404 || body.kind == "document_not_found" {
        return StoreError::NotFound;
    }
    let lowered = body.message.to_lowercase();
    if lowered.contains("search") || lowered.contains("fulltext") {
        return StoreError::SearchRejected(body.message);
    }
    StoreError::Remote(format!("store returned {}: {}", status, body.message))
}

async fn error_from_response(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.json::<RemoteErrorBody>().await.unwrap_or_default();
    classify(status, body)
}

/// Serialize one query to the JSON form the store expects.
fn encode_query(query: &Query) -> String {
    let value = match query {
        Query::Equal { attribute, value } => {
            json!({ "method": "equal", "attribute": attribute, "values": [value] })
        }
        Query::Search { attribute, term } => {
            json!({ "method": "search", "attribute": attribute, "values": [term] })
        }
        Query::Limit(count) => json!({ "method": "limit", "values": [count] }),
        Query::Offset(count) => json!({ "method": "offset", "values": [count] }),
        Query::OrderDesc(attribute) => json!({ "method": "orderDesc", "attribute": attribute }),
    };
    value.to_string()
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn list(&self, queries: &[Query]) -> Result<DocumentList, StoreError> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", encode_query(query)))
            .collect();

        let response = self
            .client
            .get(&self.documents_url)
            .query(&params)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: ListResponse = response.json().await?;
        Ok(DocumentList {
            documents: body.documents,
            total: body.total,
        })
    }

    async fn get(&self, id: &str) -> Result<Registration, StoreError> {
        let response = self.client.get(self.document_url(id)).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    async fn update(&self, id: &str, patch: Value) -> Result<Registration, StoreError> {
        let response = self
            .client
            .patch(self.document_url(id))
            .json(&json!({ "data": patch }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self.client.delete(self.document_url(id)).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}
