use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiEnvelope, ApiError, ErrorKind, RequestContext};
use crate::models::{Outcome, UploadResult};

use super::FileRef;

const UPLOAD_PATH: &str = "/upload";

/// Multipart field name the backend reads the file from
pub const FILE_FIELD: &str = "file";

const UNKNOWN_FAILURE_MESSAGE: &str = "Unknown error occurred";
const UPLOAD_FALLBACK_MESSAGE: &str = "Could not upload file";

/// Sends one local file to `POST /upload` and interprets the reply.
pub struct UploadManager {
    api: ApiClient,
}

impl UploadManager {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Upload `file` once, with the session cookie from `ctx`.
    ///
    /// No retry. The whole file is read into memory for the request.
    pub async fn upload(&self, ctx: &RequestContext, file: &FileRef) -> Outcome<UploadResult> {
        match self.send(ctx, file).await {
            Ok(result) => {
                info!(key = %result.key, size = result.size, "Upload complete");
                Outcome::success(result)
            }
            Err(e) => {
                match e.kind() {
                    ErrorKind::Business => warn!(
                        kind = e.kind().as_str(),
                        message = ?e.backend_message(),
                        locator = file.locator(),
                        "Upload rejected by backend"
                    ),
                    kind => error!(
                        kind = kind.as_str(),
                        error = %e,
                        locator = file.locator(),
                        "Upload failed"
                    ),
                }
                Outcome::failure(Self::user_message(&e))
            }
        }
    }

    async fn send(&self, ctx: &RequestContext, file: &FileRef) -> Result<UploadResult, ApiError> {
        let form = Self::build_form(file).await?;
        let response = self.api.post_multipart(ctx, UPLOAD_PATH, form).await?;

        // Parse loosely first so a failure body with odd `data` still
        // reports the backend's message.
        let envelope: ApiEnvelope<serde_json::Value> = ApiClient::read_envelope(response).await?;
        let data = envelope
            .into_result()?
            .ok_or_else(|| ApiError::InvalidResponse("Upload succeeded without data".to_string()))?;

        serde_json::from_value(data)
            .map_err(|e| ApiError::InvalidResponse(format!("Unexpected upload result: {}", e)))
    }

    async fn build_form(file: &FileRef) -> Result<Form, ApiError> {
        let path = file.local_path();
        let content = tokio::fs::read(&path)
            .await
            .map_err(|source| ApiError::LocalFile {
                locator: file.locator().to_string(),
                source,
            })?;

        let display_name = file.display_name();
        let media_type = file.media_type();
        debug!(
            file_name = %display_name,
            media_type = %media_type,
            bytes = content.len(),
            "Encoding upload"
        );

        // Raw header; derived types like `image/IMG 0001` are not valid MIME
        let content_type = HeaderValue::from_str(&media_type)
            .map_err(|_| ApiError::InvalidMediaType(media_type.clone()))?;
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, content_type);

        let part = Part::bytes(content)
            .file_name(display_name)
            .headers(headers);

        Ok(Form::new().part(FILE_FIELD, part))
    }

    fn user_message(e: &ApiError) -> String {
        match e {
            ApiError::Rejected(_) => e
                .backend_message()
                .unwrap_or(UNKNOWN_FAILURE_MESSAGE)
                .to_string(),
            ApiError::LocalFile { .. } => "Could not read the selected file".to_string(),
            ApiError::InvalidMediaType(_) => "Unsupported file type".to_string(),
            _ => UPLOAD_FALLBACK_MESSAGE.to_string(),
        }
    }
}
