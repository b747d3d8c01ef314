use std::sync::Arc;

use chrono::Utc;
use reqwest::header::{self, HeaderMap};
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiEnvelope, ApiError, RequestContext};
use crate::models::{Credentials, Outcome, SessionInfo};

use super::TokenStore;

/// Store key holding the raw session cookie
pub const TOKEN_KEY: &str = "refreshToken";

const LOGIN_PATH: &str = "/users/login";

const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password required";
const LOGIN_FALLBACK_MESSAGE: &str = "Failed to login. Please try again.";

/// Owns the login/logout protocol and the stored session token.
pub struct SessionManager {
    api: ApiClient,
    store: Arc<dyn TokenStore>,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self { api, store }
    }

    /// Authenticate and persist the session cookie.
    ///
    /// The store is written only after the backend reports success. A
    /// response without a cookie still logs in, with `token_stored = false`.
    pub async fn login(
        &self,
        identifier: &str,
        secret: &str,
        remember: bool,
    ) -> Outcome<SessionInfo> {
        self.login_with(Credentials::new(identifier, secret, remember))
            .await
    }

    pub async fn login_with(&self, credentials: Credentials) -> Outcome<SessionInfo> {
        if !credentials.is_complete() {
            return Outcome::failure(MISSING_CREDENTIALS_MESSAGE);
        }

        match self.authenticate(&credentials).await {
            Ok(info) => {
                info!(token_stored = info.token_stored, "Login successful");
                Outcome::success(info)
            }
            Err(e) => {
                error!(kind = e.kind().as_str(), error = %e, "Login failed");
                Outcome::failure(Self::user_message(&e))
            }
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<SessionInfo, ApiError> {
        let response = self
            .api
            .post_json(&RequestContext::anonymous(), LOGIN_PATH, credentials)
            .await?;

        let token = extract_session_token(response.headers());
        let envelope: ApiEnvelope<serde_json::Value> = ApiClient::read_envelope(response).await?;
        let user = envelope.into_result()?;

        let token_stored = match token {
            Some(token) => {
                self.store.set(TOKEN_KEY, &token).map_err(ApiError::Storage)?;
                true
            }
            None => {
                warn!("Login response carried no session cookie");
                false
            }
        };

        Ok(SessionInfo {
            user,
            token_stored,
            logged_in_at: Utc::now(),
        })
    }

    /// Remove the stored token. Client-local; the server session is untouched.
    pub fn logout(&self) {
        match self.store.delete(TOKEN_KEY) {
            Ok(()) => info!("Logged out"),
            Err(e) => warn!(error = %e, "Failed to delete stored token"),
        }
    }

    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    /// Credentials for the next request
    pub fn context(&self) -> RequestContext {
        match self.token() {
            Some(token) => RequestContext::with_token(token),
            None => {
                debug!("No stored token, using anonymous context");
                RequestContext::anonymous()
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn user_message(e: &ApiError) -> String {
        match e {
            ApiError::Unauthorized => "Invalid email or password".to_string(),
            ApiError::NetworkError(_) => {
                "Unable to connect to server. Check your internet connection.".to_string()
            }
            ApiError::Storage(_) => "Could not save your session on this device.".to_string(),
            _ => e
                .backend_message()
                .unwrap_or(LOGIN_FALLBACK_MESSAGE)
                .to_string(),
        }
    }
}

/// First `Set-Cookie` value of a response, verbatim.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get_all(header::SET_COOKIE).iter().next()?;
    match value.to_str() {
        Ok(cookie) if !cookie.trim().is_empty() => Some(cookie.to_string()),
        Ok(_) => None,
        Err(_) => {
            warn!("Ignoring non-UTF-8 session cookie");
            None
        }
    }
}
