//! Service layer orchestrating the store gateways

pub mod auth;
pub mod registrations;
pub mod settings;

pub use auth::{AuthService, CredentialVerifier, StaticCredentials};
pub use registrations::{ListParams, RegistrationService};
pub use settings::{SettingsPatch, SettingsService};
