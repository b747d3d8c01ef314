use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - session may be missing or expired")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rejected by server: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),

    #[error("Failed to read local file {locator}: {source}")]
    LocalFile {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    #[error("Token storage error: {0:#}")]
    Storage(anyhow::Error),
}

/// Coarse classification used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connectivity, timeout, DNS or TLS failure.
    Transport,
    /// Non-2xx status or a body that does not have the expected shape.
    Protocol,
    /// 2xx response whose status discriminator reports failure.
    Business,
    /// Failure on this device (file content, token store).
    Local,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Business => "business",
            ErrorKind::Local => "local",
        }
    }
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NetworkError(_) => ErrorKind::Transport,
            ApiError::Rejected(_) => ErrorKind::Business,
            ApiError::LocalFile { .. } | ApiError::InvalidMediaType(_) | ApiError::Storage(_) => {
                ErrorKind::Local
            }
            ApiError::AccessDenied(_)
            | ApiError::Unauthorized
            | ApiError::NotFound(_)
            | ApiError::RateLimited
            | ApiError::ServerError(_)
            | ApiError::InvalidResponse(_) => ErrorKind::Protocol,
        }
    }

    /// Backend-supplied failure text, if the backend gave one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected(message) => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }
}
