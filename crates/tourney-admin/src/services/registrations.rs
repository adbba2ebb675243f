//! Admin operations over the registration collection

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::error::{AdminError, AdminResult};
use crate::models::{Registration, RegistrationPage, RegistrationStats, RegistrationStatus};
use crate::store::{fields, DocumentStore, Query, StoreError};

/// Paging and filter parameters for the admin list view
#[derive(Debug, Clone)]
pub struct ListParams {
    pub page: u64,
    pub limit: u64,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
            status: None,
        }
    }
}

pub struct RegistrationService {
    store: Arc<dyn DocumentStore>,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// List registrations newest first, with optional status filter and
    /// team-name search. If the store rejects the search query (no fulltext
    /// index on the collection), the call degrades once to a plain
    /// pagination query instead of surfacing the failure.
    pub async fn list(&self, params: ListParams) -> AdminResult<RegistrationPage> {
        // Saturating arithmetic: an absurd page number pins the offset at
        // u64::MAX and yields an empty window instead of wrapping.
        let offset = params.page.saturating_sub(1).saturating_mul(params.limit);

        let mut queries = Vec::new();
        if let Some(status) = params.status.as_deref() {
            // An unrecognized filter value is skipped, not rejected.
            if let Ok(status) = status.parse::<RegistrationStatus>() {
                queries.push(Query::equal(fields::STATUS, status.as_str()));
            }
        }
        if let Some(term) = params.search.as_deref().filter(|term| !term.is_empty()) {
            queries.push(Query::search(fields::TEAM_NAME, term));
        }
        queries.push(Query::limit(params.limit));
        queries.push(Query::offset(offset));
        queries.push(Query::order_desc(fields::CREATED_AT));

        let listed = match self.store.list(&queries).await {
            Ok(listed) => listed,
            Err(StoreError::SearchRejected(reason)) => {
                warn!(%reason, "store rejected search query, retrying with pagination only");
                self.store
                    .list(&[Query::limit(params.limit), Query::offset(offset)])
                    .await
                    .map_err(|e| {
                        AdminError::Store(format!("Failed to list registrations: {}", e))
                    })?
            }
            Err(e) => {
                return Err(AdminError::Store(format!(
                    "Failed to list registrations: {}",
                    e
                )));
            }
        };

        info!(
            count = listed.documents.len(),
            total = listed.total,
            page = params.page,
            "listed registrations"
        );

        Ok(RegistrationPage {
            data: listed.documents,
            total: listed.total,
            page: params.page,
            limit: params.limit,
        })
    }

    pub async fn get(&self, id: &str) -> AdminResult<Registration> {
        match self.store.get(id).await {
            Ok(registration) => Ok(registration),
            Err(StoreError::NotFound) => Err(AdminError::RegistrationNotFound),
            Err(e) => Err(AdminError::Store(format!(
                "Failed to get registration: {}",
                e
            ))),
        }
    }

    /// Patch the review status. The status string is validated before any
    /// store call happens.
    pub async fn update_status(&self, id: &str, status: &str) -> AdminResult<Registration> {
        let status: RegistrationStatus = status
            .parse()
            .map_err(|_| AdminError::InvalidStatus(status.to_string()))?;

        match self
            .store
            .update(id, json!({ "status": status.as_str() }))
            .await
        {
            Ok(registration) => {
                info!(id, status = status.as_str(), "updated registration status");
                Ok(registration)
            }
            Err(StoreError::NotFound) => Err(AdminError::RegistrationNotFound),
            Err(e) => Err(AdminError::Store(format!(
                "Failed to update registration: {}",
                e
            ))),
        }
    }

    pub async fn delete(&self, id: &str) -> AdminResult<()> {
        match self.store.delete(id).await {
            Ok(()) => {
                info!(id, "deleted registration");
                Ok(())
            }
            Err(StoreError::NotFound) => Err(AdminError::RegistrationNotFound),
            Err(e) => Err(AdminError::Store(format!(
                "Failed to delete registration: {}",
                e
            ))),
        }
    }

    /// Dashboard counters. Fail-soft: any store failure yields all-zero
    /// counts instead of an error.
    pub async fn stats(&self) -> RegistrationStats {
        match self.collect_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "stats query failed, returning zero counts");
                RegistrationStats::default()
            }
        }
    }

    async fn collect_stats(&self) -> Result<RegistrationStats, StoreError> {
        let total = self.count(None).await?;
        let pending = self.count(Some(RegistrationStatus::Pending)).await?;
        let approved = self.count(Some(RegistrationStatus::Approved)).await?;
        let rejected = self.count(Some(RegistrationStatus::Rejected)).await?;
        Ok(RegistrationStats {
            total,
            pending,
            approved,
            rejected,
        })
    }

    /// Count matches by reading the reported total of a one-document page.
    async fn count(&self, status: Option<RegistrationStatus>) -> Result<u64, StoreError> {
        let mut queries = Vec::new();
        if let Some(status) = status {
            queries.push(Query::equal(fields::STATUS, status.as_str()));
        }
        queries.push(Query::limit(1));
        Ok(self.store.list(&queries).await?.total)
    }
}
