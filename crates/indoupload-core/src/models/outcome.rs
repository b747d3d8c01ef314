use serde::{Deserialize, Serialize};

/// Result of every public session and upload operation.
///
/// Serializes as `{"status":"success","data":...}` or
/// `{"status":"failure","message":"..."}`. Callers branch on the variant,
/// and show `message` to the user as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome<T> {
    Success { data: T },
    Failure { message: String },
}

impl<T> Outcome<T> {
    pub fn success(data: T) -> Self {
        Outcome::Success { data }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success { data } => Some(data),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { message } => Some(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success { data } => Outcome::Success { data: f(data) },
            Outcome::Failure { message } => Outcome::Failure { message },
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Outcome::Success { data } => Ok(data),
            Outcome::Failure { message } => Err(message),
        }
    }
}
