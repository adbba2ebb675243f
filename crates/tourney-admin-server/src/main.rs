//! Tourney Admin Server - registration administration backend
//!
//! Serves the admin panel API over the remote registration collection and
//! the local settings file.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tourney_admin::services::StaticCredentials;
use tourney_admin::settings::SettingsStore;
use tourney_admin::store::{AppwriteConfig, AppwriteStore, DocumentStore, MemoryStore};

use tourney_admin_server::config::{Config, StoreBackend};
use tourney_admin_server::routes::build_router;
use tourney_admin_server::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "tourney-admin-server", version, about = "Admin API for tournament registrations")]
struct Args {
    /// Path to a TOML config file (environment variables otherwise)
    #[arg(long)]
    config: Option<String>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tourney_admin=info,tourney_admin_server=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = match args.config.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!(
        "Starting Tourney Admin Server on {}:{}",
        config.host, config.port
    );

    // Construct the document store backend
    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Appwrite => {
            if config.appwrite_project_id.is_empty() || config.appwrite_api_key.is_empty() {
                bail!("APPWRITE_PROJECT_ID and APPWRITE_API_KEY are required for the appwrite backend");
            }
            info!("Using Appwrite store at {}", config.appwrite_endpoint);
            Arc::new(AppwriteStore::new(AppwriteConfig {
                endpoint: config.appwrite_endpoint.clone(),
                project_id: config.appwrite_project_id.clone(),
                api_key: config.appwrite_api_key.clone(),
                database_id: config.appwrite_database_id.clone(),
                collection_id: config.appwrite_collection_id.clone(),
            })?)
        }
        StoreBackend::Memory => {
            info!("Using in-memory store (documents are not persisted)");
            Arc::new(MemoryStore::new())
        }
    };

    let settings = Arc::new(SettingsStore::new(config.settings_path.clone()));
    let verifier = Arc::new(StaticCredentials::new(
        config.admin_username.clone(),
        config.admin_password.clone(),
    ));

    // Create app state
    let state = Arc::new(AppState {
        store,
        settings,
        verifier,
        config: config.clone(),
    });

    // Build router
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
