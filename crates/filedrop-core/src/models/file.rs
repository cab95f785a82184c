use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "rtf"];
const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg"];

/// Coarse file classification derived from the extension.
///
/// Shared by local rendering and by the `category` field the server returns;
/// labels the client does not know deserialize as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Document,
    Archive,
    Video,
    Audio,
    #[serde(other)]
    Unknown,
}

impl FileCategory {
    /// The five concrete categories, in display order.
    pub const KNOWN: [FileCategory; 5] = [
        FileCategory::Image,
        FileCategory::Document,
        FileCategory::Archive,
        FileCategory::Video,
        FileCategory::Audio,
    ];

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileCategory::Image => IMAGE_EXTENSIONS,
            FileCategory::Document => DOCUMENT_EXTENSIONS,
            FileCategory::Archive => ARCHIVE_EXTENSIONS,
            FileCategory::Video => VIDEO_EXTENSIONS,
            FileCategory::Audio => AUDIO_EXTENSIONS,
            FileCategory::Unknown => &[],
        }
    }

    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.to_lowercase();
        Self::KNOWN
            .into_iter()
            .find(|category| category.extensions().contains(&extension.as_str()))
            .unwrap_or(FileCategory::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Document => "document",
            FileCategory::Archive => "archive",
            FileCategory::Video => "video",
            FileCategory::Audio => "audio",
            FileCategory::Unknown => "unknown",
        }
    }

    /// Plural heading used in the upload guidelines.
    pub fn heading(self) -> &'static str {
        match self {
            FileCategory::Image => "Images",
            FileCategory::Document => "Documents",
            FileCategory::Archive => "Archives",
            FileCategory::Video => "Videos",
            FileCategory::Audio => "Audio",
            FileCategory::Unknown => "Other",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased substring after the last `.`, or an empty string when the
/// name has no `.` at all.
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// MIME type declared for a file, guessed from its extension.
/// Empty when the extension is not recognized.
pub fn declared_content_type(filename: &str) -> &'static str {
    match file_extension(filename).as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        // Documents
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "rtf" => "application/rtf",
        // Archives
        "zip" => "application/zip",
        "rar" => "application/vnd.rar",
        "7z" => "application/x-7z-compressed",
        "tar" => "application/x-tar",
        "gz" => "application/gzip",
        // Videos
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "webm" => "video/webm",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "ogg" => "audio/ogg",
        _ => "",
    }
}

/// A file picked by the user, described by metadata only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    /// Declared MIME type, possibly empty.
    pub content_type: String,
    #[serde(skip)]
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        size: u64,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: content_type.into(),
            path: path.into(),
        }
    }

    /// Describe a file on disk. Reads filesystem metadata only, never content.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

        if !metadata.is_file() {
            return Err(anyhow::anyhow!("Not a regular file: {}", path.display()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow::anyhow!("Invalid file path: {}", path.display()))?;

        let content_type = declared_content_type(&name);
        Ok(Self::new(path, name, metadata.len(), content_type))
    }

    pub fn extension(&self) -> String {
        file_extension(&self.name)
    }

    pub fn category(&self) -> FileCategory {
        FileCategory::from_extension(&self.extension())
    }
}
