//! Admin credential check
//!
//! Login is stateless: a successful check returns a transient user payload
//! and nothing is stored or issued. Subsequent admin calls are not gated on
//! having logged in.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{AdminError, AdminResult};
use crate::models::AdminUser;

/// Verifies a submitted credential pair
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Configured credential pair for the single admin account
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
}

impl AuthService {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }

    /// Check a login attempt. The rejection never says which field was
    /// wrong.
    pub fn login(&self, username: &str, password: &str) -> AdminResult<AdminUser> {
        if self.verifier.verify(username, password) {
            info!(username, "admin login");
            Ok(AdminUser {
                username: username.to_string(),
                role: "administrator".to_string(),
                login_time: Utc::now(),
            })
        } else {
            warn!(username, "rejected admin login attempt");
            Err(AdminError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(Arc::new(StaticCredentials::new("admin", "0000")))
    }

    #[test]
    fn test_login_accepts_configured_pair() {
        let user = service().login("admin", "0000").unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(user.role, "administrator");
    }

    #[test]
    fn test_login_rejects_wrong_password_and_username_alike() {
        let wrong_password = service().login("admin", "1234").unwrap_err();
        let wrong_username = service().login("root", "0000").unwrap_err();
        // Same error either way, so responses cannot reveal which half matched.
        assert_eq!(wrong_password.to_string(), wrong_username.to_string());
        assert!(matches!(wrong_password, AdminError::InvalidCredentials));
    }

    #[test]
    fn test_credentials_are_case_sensitive() {
        assert!(service().login("Admin", "0000").is_err());
        assert!(service().login("admin", "000").is_err());
    }
}
