//! Data models for the registration admin module

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Review state of a registration
///
/// Writes are constrained to this set; documents already in the store may
/// carry any historical string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RegistrationStatus::Pending),
            "approved" => Ok(RegistrationStatus::Approved),
            "rejected" => Ok(RegistrationStatus::Rejected),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registration document as held by the remote collection
///
/// Only the fields this module reads are typed. Everything else rides along
/// in `extra` so documents round-trip through updates without losing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Store-assigned document id
    #[serde(rename = "$id")]
    pub id: String,

    /// Store-assigned creation timestamp
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Team display name (searched by the admin list view)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,

    /// Review status string as stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// All remaining document fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Registration {
    /// Apply a partial update in place. Recognized attributes land in the
    /// typed fields, everything else in `extra`.
    pub fn apply_patch(&mut self, patch: &Map<String, Value>) {
        for (key, value) in patch {
            match key.as_str() {
                "status" => self.status = value.as_str().map(str::to_owned),
                "team_name" => self.team_name = value.as_str().map(str::to_owned),
                _ => {
                    self.extra.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

/// One page of registrations in the admin list shape
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationPage {
    pub data: Vec<Registration>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

/// Dashboard counters for the admin overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

/// Transient admin identity returned by a successful login
///
/// Nothing is persisted; the payload only seeds the client session.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    pub username: String,
    pub role: String,
    #[serde(rename = "loginTime")]
    pub login_time: DateTime<Utc>,
}
