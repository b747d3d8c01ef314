use serde::{Deserialize, Serialize};

/// Stored artifact description returned by `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct UploadResult {
    pub originalname: String,
    pub size: u64,
    pub mimetype: String,
    pub bucket: String,
    pub key: String,
    pub acl: String,
    #[serde(rename = "storageClass")]
    pub storage_class: String,
    pub location: String,
    pub etag: String,
}

impl UploadResult {
    pub fn size_display(&self) -> String {
        format!("{} bytes", self.size)
    }

    /// Labelled fields in the order the upload screen shows them
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Original Name", self.originalname.clone()),
            ("File Size", self.size_display()),
            ("MIME Type", self.mimetype.clone()),
            ("Bucket", self.bucket.clone()),
            ("Key", self.key.clone()),
            ("ACL", self.acl.clone()),
            ("Storage Class", self.storage_class.clone()),
            ("Location", self.location.clone()),
            ("ETag", self.etag.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "originalname": "photo.png",
        "size": 20480,
        "mimetype": "image/png",
        "bucket": "cms-media",
        "key": "uploads/1718000000-photo.png",
        "acl": "public-read",
        "storageClass": "STANDARD",
        "location": "https://cms-media.s3.amazonaws.com/uploads/1718000000-photo.png",
        "etag": "\"9b2cf535f27731c974343645a3985328\""
    }"#;

    #[test]
    fn test_parse_upload_result() {
        let result: UploadResult = serde_json::from_str(SAMPLE).expect("Failed to parse sample");
        assert_eq!(result.originalname, "photo.png");
        assert_eq!(result.size, 20480);
        assert_eq!(result.storage_class, "STANDARD");
        assert_eq!(result.etag, "\"9b2cf535f27731c974343645a3985328\"");
    }

    #[test]
    fn test_serializes_backend_field_names() {
        let result: UploadResult = serde_json::from_str(SAMPLE).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["storageClass"], "STANDARD");
        assert!(value.get("storage_class").is_none());
    }

    #[test]
    fn test_display_fields() {
        let result: UploadResult = serde_json::from_str(SAMPLE).unwrap();
        let fields = result.display_fields();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[0], ("Original Name", "photo.png".to_string()));
        assert_eq!(fields[1], ("File Size", "20480 bytes".to_string()));
        assert_eq!(fields[6], ("Storage Class", "STANDARD".to_string()));
    }
}
