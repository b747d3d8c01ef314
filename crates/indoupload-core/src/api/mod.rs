//! HTTP transport for the content-management backend.
//!
//! This module provides the `ApiClient` used by the session and upload
//! managers, the `RequestContext` that carries the session cookie into each
//! request, and the `ApiError` taxonomy they normalize into outcomes.

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiEnvelope, RequestContext, STATUS_SUCCESS};
pub use error::{ApiError, ErrorKind};
