//! Single-file media upload.
//!
//! `FileRef` derives the multipart file name and media type from a locator;
//! `UploadManager` sends it to the backend and turns the reply into an
//! `Outcome<UploadResult>`.

pub mod file_ref;
pub mod manager;

pub use file_ref::{derive_display_name, derive_media_type, FileRef, DEFAULT_FILE_NAME};
pub use manager::{UploadManager, FILE_FIELD};
