//! Authentication module for the session token lifecycle.
//!
//! This module provides:
//! - `SessionManager`: login against `/users/login`, token persistence, logout
//! - `TokenStore`: secure storage for the single session token, with
//!   `KeyringStore` (OS keychain) and `MemoryStore` implementations

pub mod credentials;
pub mod session;

pub use credentials::{KeyringStore, MemoryStore, TokenStore};
pub use session::{SessionManager, TOKEN_KEY};
