//! Configuration management for the admin server

use anyhow::{Context, Result};
use serde::Deserialize;
use std::str::FromStr;

/// Document store backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Appwrite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "appwrite" => Ok(StoreBackend::Appwrite),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Store backend (default: appwrite)
    #[serde(default)]
    pub store_backend: StoreBackend,

    /// Server host (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Appwrite API endpoint (default: https://cloud.appwrite.io/v1)
    #[serde(default = "default_appwrite_endpoint")]
    pub appwrite_endpoint: String,

    /// Appwrite project id (required for the appwrite backend)
    #[serde(default)]
    pub appwrite_project_id: String,

    /// Appwrite API key (required for the appwrite backend)
    #[serde(default)]
    pub appwrite_api_key: String,

    /// Database holding the registration collection (default: tournament)
    #[serde(default = "default_database_id")]
    pub appwrite_database_id: String,

    /// Registration collection id (default: registrations)
    #[serde(default = "default_collection_id")]
    pub appwrite_collection_id: String,

    /// Admin account username (default: admin)
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Admin account password (default: 0000)
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Path of the settings JSON file (default: ./data/settings.json)
    #[serde(default = "default_settings_path")]
    pub settings_path: String,

    /// CORS allowed origins (comma-separated). If empty, any origin is
    /// allowed (dev mode).
    pub cors_allowed_origins: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_appwrite_endpoint() -> String {
    "https://cloud.appwrite.io/v1".to_string()
}

fn default_database_id() -> String {
    "tournament".to_string()
}

fn default_collection_id() -> String {
    "registrations".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "0000".to_string()
}

fn default_settings_path() -> String {
    "./data/settings.json".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Validate the backend name to prevent silent fallthrough on typos
        let store_backend = match std::env::var("STORE_BACKEND") {
            Ok(raw) => raw
                .parse()
                .map_err(|e: String| anyhow::anyhow!("Invalid STORE_BACKEND: {}", e))?,
            Err(_) => StoreBackend::default(),
        };
        let host = std::env::var("ADMIN_SERVER_HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("ADMIN_SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_port);
        let appwrite_endpoint =
            std::env::var("APPWRITE_ENDPOINT").unwrap_or_else(|_| default_appwrite_endpoint());
        let appwrite_project_id = std::env::var("APPWRITE_PROJECT_ID").unwrap_or_default();
        let appwrite_api_key = std::env::var("APPWRITE_API_KEY").unwrap_or_default();
        let appwrite_database_id =
            std::env::var("APPWRITE_DATABASE_ID").unwrap_or_else(|_| default_database_id());
        let appwrite_collection_id =
            std::env::var("APPWRITE_COLLECTION_ID").unwrap_or_else(|_| default_collection_id());
        let admin_username =
            std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| default_admin_username());
        let admin_password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| default_admin_password());
        let settings_path =
            std::env::var("SETTINGS_PATH").unwrap_or_else(|_| default_settings_path());
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS").ok();

        Ok(Self {
            store_backend,
            host,
            port,
            appwrite_endpoint,
            appwrite_project_id,
            appwrite_api_key,
            appwrite_database_id,
            appwrite_collection_id,
            admin_username,
            admin_password,
            settings_path,
            cors_allowed_origins,
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::default(),
            host: default_host(),
            port: default_port(),
            appwrite_endpoint: default_appwrite_endpoint(),
            appwrite_project_id: String::new(),
            appwrite_api_key: String::new(),
            appwrite_database_id: default_database_id(),
            appwrite_collection_id: default_collection_id(),
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            settings_path: default_settings_path(),
            cors_allowed_origins: None,
        }
    }
}
