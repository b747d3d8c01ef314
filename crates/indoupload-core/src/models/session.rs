use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login request body. Never persisted.
#[derive(Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "email")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
    pub remember: bool,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>, remember: bool) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
            remember,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.identifier.trim().is_empty() && !self.secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("remember", &self.remember)
            .finish()
    }
}

/// Returned by a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// The backend's `data` field, passed through untouched
    pub user: Option<serde_json::Value>,
    /// False when the response carried no usable session cookie
    pub token_stored: bool,
    pub logged_in_at: DateTime<Utc>,
}
