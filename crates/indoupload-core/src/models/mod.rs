//! Data models shared by the session and upload managers.
//!
//! - `Outcome`: tagged success/failure result of every public operation
//! - `UploadResult`: stored artifact description returned by the backend
//! - `Credentials`, `SessionInfo`: login input and login result

pub mod outcome;
pub mod session;
pub mod upload;

pub use outcome::Outcome;
pub use session::{Credentials, SessionInfo};
pub use upload::UploadResult;
