//! Application state

use std::sync::Arc;

use tourney_admin::services::CredentialVerifier;
use tourney_admin::settings::SettingsStore;
use tourney_admin::store::DocumentStore;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Gateway to the registration collection
    pub store: Arc<dyn DocumentStore>,

    /// File-backed application settings
    pub settings: Arc<SettingsStore>,

    /// Admin credential check
    pub verifier: Arc<dyn CredentialVerifier>,

    /// Server configuration
    pub config: Config,
}
