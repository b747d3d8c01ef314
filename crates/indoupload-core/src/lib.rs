//! indoupload core - session management and authenticated media upload.
//!
//! A presentation layer logs in through [`SessionManager`], which stores the
//! backend's session cookie in a [`TokenStore`], then uploads images through
//! [`UploadManager`]. Every public operation returns an [`Outcome`]; nothing
//! is surfaced as an error type past that boundary.
//!
//! [`UploadClient`] wires both managers to one transport and one store.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod models;
pub mod upload;

pub use api::{ApiClient, ApiError, ErrorKind, RequestContext};
pub use auth::{KeyringStore, MemoryStore, SessionManager, TokenStore, TOKEN_KEY};
pub use client::UploadClient;
pub use config::Config;
pub use models::{Credentials, Outcome, SessionInfo, UploadResult};
pub use upload::{FileRef, UploadManager};
