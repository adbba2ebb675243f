//! Document store gateway for the registration collection
//!
//! The registration data lives in a remote document database. Everything the
//! admin services need from it goes through [`DocumentStore`], and failures
//! come back as typed [`StoreError`] kinds so callers branch on the kind
//! instead of inspecting failure text.

pub mod appwrite;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::Registration;

pub use appwrite::{AppwriteConfig, AppwriteStore};
pub use memory::MemoryStore;

/// Attribute names used in store queries
pub mod fields {
    pub const ID: &str = "$id";
    pub const CREATED_AT: &str = "$createdAt";
    pub const TEAM_NAME: &str = "team_name";
    pub const STATUS: &str = "status";
}

/// Failure kinds a store call can produce
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document with the requested id
    #[error("document not found")]
    NotFound,

    /// The store refused a search query, typically because the searched
    /// attribute has no fulltext index
    #[error("search rejected by store: {0}")]
    SearchRejected(String),

    /// Anything else: unreachable store, auth failure, remote timeout,
    /// malformed response
    #[error("{0}")]
    Remote(String),
}

/// Filter and paging primitives understood by the store
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal { attribute: String, value: String },
    Search { attribute: String, term: String },
    Limit(u64),
    Offset(u64),
    OrderDesc(String),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Query::Equal {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn search(attribute: impl Into<String>, term: impl Into<String>) -> Self {
        Query::Search {
            attribute: attribute.into(),
            term: term.into(),
        }
    }

    pub fn limit(count: u64) -> Self {
        Query::Limit(count)
    }

    pub fn offset(count: u64) -> Self {
        Query::Offset(count)
    }

    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Query::OrderDesc(attribute.into())
    }
}

/// One page of documents plus the store's total match count
#[derive(Debug, Clone, Default)]
pub struct DocumentList {
    pub documents: Vec<Registration>,
    pub total: u64,
}

/// Gateway to the registration collection
///
/// No retry policy lives here; degrade-on-failure decisions belong to the
/// calling service.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List documents matching the given queries, with the total count of
    /// matches before limit/offset are applied.
    async fn list(&self, queries: &[Query]) -> Result<DocumentList, StoreError>;

    /// Fetch a single document by id.
    async fn get(&self, id: &str) -> Result<Registration, StoreError>;

    /// Apply a partial update and return the updated document.
    async fn update(&self, id: &str, patch: Value) -> Result<Registration, StoreError>;

    /// Delete a document by id.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
