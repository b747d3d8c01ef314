use std::path::PathBuf;

use reqwest::Url;

/// Name used when the locator has no final path segment
pub const DEFAULT_FILE_NAME: &str = "image.jpg";

/// Reference to local content picked by the user.
///
/// `display_name` and `media_type` are derived from the locator unless set
/// explicitly with the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    locator: String,
    display_name: Option<String>,
    media_type: Option<String>,
}

impl FileRef {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            display_name: None,
            media_type: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn display_name(&self) -> String {
        match self.display_name {
            Some(ref name) => name.clone(),
            None => derive_display_name(&self.locator).to_string(),
        }
    }

    pub fn media_type(&self) -> String {
        match self.media_type {
            Some(ref media_type) => media_type.clone(),
            None => derive_media_type(&self.display_name()),
        }
    }

    /// Filesystem path holding the content. `file://` URLs are decoded,
    /// anything else is taken as a path.
    pub fn local_path(&self) -> PathBuf {
        if let Ok(url) = Url::parse(&self.locator) {
            if url.scheme() == "file" {
                if let Ok(path) = url.to_file_path() {
                    return path;
                }
            }
        }
        PathBuf::from(&self.locator)
    }
}

/// Final `/`-separated segment, or `DEFAULT_FILE_NAME` when it is empty
pub fn derive_display_name(locator: &str) -> &str {
    match locator.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => DEFAULT_FILE_NAME,
    }
}

/// `image/<text after the last '.'>`. A name without a dot is used whole.
pub fn derive_media_type(display_name: &str) -> String {
    let extension = display_name.rsplit('.').next().unwrap_or(display_name);
    format!("image/{}", extension)
}
