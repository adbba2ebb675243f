//! Tourney Registration Admin Module
//!
//! This module provides the administration layer over the tournament
//! registration collection held in a remote document store.
//!
//! # Features
//! - Document store gateway with typed failure kinds (Appwrite or in-memory)
//! - Registration listing with pagination, status filter, and team search
//! - Review status updates, deletion, and dashboard counters
//! - File-backed application settings with a public registration-open flag
//! - Stateless admin credential check

pub mod error;
pub mod models;
pub mod services;
pub mod settings;
pub mod store;

pub use error::{AdminError, AdminResult};
pub use models::{Registration, RegistrationStatus};
pub use settings::{Settings, SettingsStore};
pub use store::{DocumentStore, StoreError};
