//! File-backed application settings
//!
//! A single JSON object with one recognized key, `registration_open`. Reads
//! are fail-soft: a missing or unreadable file yields the default (open).
//! Saves go through a temporary file plus rename so a concurrent reader
//! never sees a truncated file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::fs;
use tracing::warn;

fn default_registration_open() -> bool {
    true
}

/// Application settings as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether the public registration form accepts new submissions
    #[serde(default = "default_registration_open")]
    pub registration_open: bool,

    /// Unrecognized keys in the settings file survive a save untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registration_open: true,
            extra: Map::new(),
        }
    }
}

/// Store for the settings file
///
/// The path is injected at construction; nothing here assumes a
/// process-wide location.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to the default on any read or parse
    /// failure. Never errors: the panel stays usable with defaults.
    pub async fn load(&self) -> Settings {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(
                        path = %self.path.display(),
                        error = %err,
                        "settings file is not valid JSON, using defaults"
                    );
                    Settings::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "could not read settings file, using defaults"
                );
                Settings::default()
            }
        }
    }

    /// Persist settings atomically: write a sibling temporary file, then
    /// rename it over the real one.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create settings directory: {}", parent.display())
                })?;
            }
        }

        let bytes =
            serde_json::to_vec_pretty(settings).context("Failed to serialize settings")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("Failed to write settings file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace settings file: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_defaults_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let settings = store.load().await;
        assert!(settings.registration_open);
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        let settings = Settings {
            registration_open: false,
            ..Default::default()
        };
        store.save(&settings).await.unwrap();

        let loaded = store.load().await;
        assert!(!loaded.registration_open);

        // The temporary file must not linger after the rename.
        assert!(!dir.path().join("settings.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_defaults_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = SettingsStore::new(path);
        let settings = store.load().await;
        assert!(settings.registration_open);
    }

    #[tokio::test]
    async fn test_unknown_keys_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            br#"{"registration_open": false, "theme": "dark"}"#,
        )
        .unwrap();

        let store = SettingsStore::new(path.clone());
        let mut settings = store.load().await;
        settings.registration_open = true;
        store.save(&settings).await.unwrap();

        let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["registration_open"], Value::Bool(true));
        assert_eq!(raw["theme"], "dark");
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("settings.json");
        let store = SettingsStore::new(path.clone());

        store.save(&Settings::default()).await.unwrap();
        assert!(path.exists());
    }
}
