//! Application settings service

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::error::{AdminError, AdminResult};
use crate::settings::{Settings, SettingsStore};

/// Partial settings update: an absent field leaves the stored value alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPatch {
    pub registration_open: Option<bool>,
}

pub struct SettingsService {
    store: Arc<SettingsStore>,
}

impl SettingsService {
    pub fn new(store: Arc<SettingsStore>) -> Self {
        Self { store }
    }

    /// Current settings; defaults to registration open when the file is
    /// missing or unreadable.
    pub async fn get(&self) -> Settings {
        self.store.load().await
    }

    /// Apply a partial update and persist the result.
    pub async fn update(&self, patch: SettingsPatch) -> AdminResult<Settings> {
        let mut settings = self.store.load().await;
        if let Some(open) = patch.registration_open {
            settings.registration_open = open;
            info!(registration_open = open, "updated registration flag");
        }
        self.store
            .save(&settings)
            .await
            .map_err(|e| AdminError::SettingsSave(e.to_string()))?;
        Ok(settings)
    }
}
