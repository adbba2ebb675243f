//! In-process document store
//!
//! Backs the `memory` store backend and the test suites. Query semantics
//! mirror the remote store closely enough for the services not to care:
//! totals count matches before paging, and search against an unindexed
//! collection is rejected rather than silently scanned.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{fields, DocumentList, DocumentStore, Query, StoreError};
use crate::models::Registration;

pub struct MemoryStore {
    documents: RwLock<Vec<Registration>>,
    search_indexed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            search_indexed: true,
        }
    }

    /// Store whose collection has no fulltext index: search queries fail
    /// the same way they do against an unindexed remote collection.
    pub fn without_search_index() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            search_indexed: false,
        }
    }

    pub async fn insert(&self, registration: Registration) {
        self.documents.write().await.push(registration);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn field_value(doc: &Registration, attribute: &str) -> Option<String> {
    match attribute {
        fields::ID => Some(doc.id.clone()),
        fields::STATUS => doc.status.clone(),
        fields::TEAM_NAME => doc.team_name.clone(),
        _ => doc
            .extra
            .get(attribute)
            .and_then(Value::as_str)
            .map(str::to_owned),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, queries: &[Query]) -> Result<DocumentList, StoreError> {
        let mut matches: Vec<Registration> = self.documents.read().await.clone();
        let mut limit: u64 = 25;
        let mut offset: u64 = 0;
        let mut order_desc: Option<&str> = None;

        for query in queries {
            match query {
                Query::Equal { attribute, value } => {
                    matches.retain(|doc| {
                        field_value(doc, attribute).as_deref() == Some(value.as_str())
                    });
                }
                Query::Search { attribute, term } => {
                    if !self.search_indexed {
                        return Err(StoreError::SearchRejected(format!(
                            "Searching by attribute \"{}\" requires a fulltext index",
                            attribute
                        )));
                    }
                    let term = term.to_lowercase();
                    matches.retain(|doc| {
                        field_value(doc, attribute)
                            .map(|value| value.to_lowercase().contains(&term))
                            .unwrap_or(false)
                    });
                }
                Query::Limit(count) => limit = *count,
                Query::Offset(count) => offset = *count,
                Query::OrderDesc(attribute) => order_desc = Some(attribute.as_str()),
            }
        }

        // Only the creation timestamp is ordered on.
        if order_desc == Some(fields::CREATED_AT) {
            matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        let total = matches.len() as u64;
        let documents: Vec<Registration> = matches
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(DocumentList { documents, total })
    }

    async fn get(&self, id: &str) -> Result<Registration, StoreError> {
        self.documents
            .read()
            .await
            .iter()
            .find(|doc| doc.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: &str, patch: Value) -> Result<Registration, StoreError> {
        let patch = patch.as_object().cloned().unwrap_or_default();
        let mut documents = self.documents.write().await;
        let doc = documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or(StoreError::NotFound)?;
        doc.apply_patch(&patch);
        Ok(doc.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        if documents.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::{json, Map};

    fn registration(id: &str, team: &str, status: &str, created_secs: i64) -> Registration {
        Registration {
            id: id.to_string(),
            created_at: DateTime::from_timestamp(created_secs, 0),
            team_name: Some(team.to_string()),
            status: Some(status.to_string()),
            extra: Map::new(),
        }
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert(registration("r1", "Alpha Wolves", "pending", 100))
            .await;
        store
            .insert(registration("r2", "Beta Bears", "approved", 200))
            .await;
        store
            .insert(registration("r3", "Gamma Geese", "pending", 300))
            .await;
        store
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let store = seeded().await;
        let listed = store
            .list(&[
                Query::limit(10),
                Query::offset(0),
                Query::order_desc(fields::CREATED_AT),
            ])
            .await
            .unwrap();
        assert_eq!(listed.total, 3);
        let ids: Vec<&str> = listed.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["r3", "r2", "r1"]);
    }

    #[tokio::test]
    async fn test_list_total_counts_matches_before_paging() {
        let store = seeded().await;
        let listed = store
            .list(&[Query::limit(1), Query::offset(0)])
            .await
            .unwrap();
        assert_eq!(listed.documents.len(), 1);
        assert_eq!(listed.total, 3);
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let store = seeded().await;
        let listed = store
            .list(&[Query::equal(fields::STATUS, "pending"), Query::limit(10)])
            .await
            .unwrap();
        assert_eq!(listed.total, 2);
        assert!(listed
            .documents
            .iter()
            .all(|d| d.status.as_deref() == Some("pending")));
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive_substring() {
        let store = seeded().await;
        let listed = store
            .list(&[Query::search(fields::TEAM_NAME, "WOLV"), Query::limit(10)])
            .await
            .unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.documents[0].id, "r1");
    }

    #[tokio::test]
    async fn test_unindexed_store_rejects_search() {
        let store = MemoryStore::without_search_index();
        store
            .insert(registration("r1", "Alpha Wolves", "pending", 100))
            .await;
        let err = store
            .list(&[Query::search(fields::TEAM_NAME, "alpha"), Query::limit(10)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SearchRejected(_)));

        // Pagination-only queries still work against the same store.
        let listed = store
            .list(&[Query::limit(10), Query::offset(0)])
            .await
            .unwrap();
        assert_eq!(listed.total, 1);
    }

    #[tokio::test]
    async fn test_get_update_delete_roundtrip() {
        let store = seeded().await;

        let doc = store.get("r2").await.unwrap();
        assert_eq!(doc.team_name.as_deref(), Some("Beta Bears"));

        let updated = store
            .update("r2", json!({ "status": "rejected" }))
            .await
            .unwrap();
        assert_eq!(updated.status.as_deref(), Some("rejected"));
        assert_eq!(
            store.get("r2").await.unwrap().status.as_deref(),
            Some("rejected")
        );

        store.delete("r2").await.unwrap();
        assert!(matches!(
            store.get("r2").await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.get("nope").await.unwrap_err(),
            StoreError::NotFound
        ));
        assert!(matches!(
            store.update("nope", json!({})).await.unwrap_err(),
            StoreError::NotFound
        ));
        assert!(matches!(
            store.delete("nope").await.unwrap_err(),
            StoreError::NotFound
        ));
    }
}
