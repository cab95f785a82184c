use serde::{Deserialize, Serialize};

use super::FileCategory;
use crate::presentation::{display_content_type, display_upload_time};

/// Successful response of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Publicly retrievable location of the stored file.
    pub url: String,
    pub metadata: UploadMetadata,
}

/// File metadata recorded by the storage endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub original_filename: String,
    /// Exact size in bytes. Not every server sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    pub file_size_mb: f64,
    /// `null` when the upload carried no declared type.
    pub content_type: Option<String>,
    pub category: FileCategory,
    pub upload_time: String,
    /// Server-assigned storage identifier.
    pub unique_filename: String,
}

impl UploadMetadata {
    pub fn display_content_type(&self) -> &str {
        display_content_type(self.content_type.as_deref())
    }

    pub fn display_upload_time(&self) -> String {
        display_upload_time(&self.upload_time)
    }
}

/// Error body of a failed upload. Only a string `detail` is meaningful.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

impl UploadErrorBody {
    /// Non-empty server-supplied reason, if the body carries one.
    pub fn reason(self) -> Option<String> {
        self.detail.filter(|d| !d.trim().is_empty())
    }
}
