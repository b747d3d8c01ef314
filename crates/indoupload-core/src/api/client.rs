//! HTTP transport for the content-management backend.
//!
//! `ApiClient` wraps a single `reqwest::Client` configured with the base
//! endpoint and request timeout. Credentials are not ambient: every call
//! takes a `RequestContext` and the client turns its token into a `Cookie`
//! header.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, multipart::Form, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Status discriminator value the backend uses for success.
pub const STATUS_SUCCESS: &str = "success";

/// Per-call credentials derived from the stored session token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    token: Option<String>,
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl RequestContext {
    /// Context for unauthenticated requests
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The `name=value` pair to send back to the server.
    ///
    /// The stored token is a raw `Set-Cookie` value, so attributes such as
    /// `Path` or `HttpOnly` after the first `;` are dropped.
    pub fn cookie_header(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(|t| t.split(';').next().unwrap_or_default().trim())
            .filter(|pair| !pair.is_empty())
    }
}

/// Response body shape shared by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Split the envelope on its status discriminator.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected(self.message))
        }
    }
}

/// API client for the content-management backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a resource path such as `/upload`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn context_headers(ctx: &RequestContext) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(cookie) = ctx.cookie_header() {
            let value = header::HeaderValue::from_str(cookie).map_err(|e| {
                ApiError::Storage(anyhow::anyhow!("Stored token is not a valid cookie: {}", e))
            })?;
            headers.insert(header::COOKIE, value);
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// POST a JSON body. Returns the response once its status is 2xx so the
    /// caller can read headers before the body.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path);
        debug!(url = %url, authenticated = ctx.is_authenticated(), "POST json");

        let response = self
            .client
            .post(&url)
            .headers(Self::context_headers(ctx)?)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        Self::check_response(response).await
    }

    /// POST a multipart form. reqwest sets
    /// `Content-Type: multipart/form-data; boundary=...` itself.
    pub async fn post_multipart(
        &self,
        ctx: &RequestContext,
        path: &str,
        form: Form,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path);
        debug!(url = %url, authenticated = ctx.is_authenticated(), "POST multipart");

        let response = self
            .client
            .post(&url)
            .headers(Self::context_headers(ctx)?)
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        Self::check_response(response).await
    }

    /// Read the body and parse it as a status envelope.
    pub async fn read_envelope<T: DeserializeOwned>(
        response: Response,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("{}: {}", e, ApiError::truncate_body(&text)))
        })
    }
}
