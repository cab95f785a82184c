//! Text rendering of the upload session for the terminal.

use filedrop_core::presentation::display_content_type;
use filedrop_core::{format_size, SelectedFile, UploadResult};

/// Details of the locally selected file, shown before upload.
pub fn file_details(file: &SelectedFile) -> String {
    [
        format!("File:     {}", file.name),
        format!("Size:     {}", format_size(file.size)),
        format!("Type:     {}", display_content_type(Some(file.content_type.as_str()))),
        format!("Category: {}", file.category()),
    ]
    .join("\n")
}

/// Label of the upload trigger.
pub fn upload_label(uploading: bool, percent: u8) -> String {
    if uploading {
        format!("Uploading... {}%", percent)
    } else {
        "Upload File".to_string()
    }
}

/// Server metadata and the access URL of a finished upload.
pub fn success_details(result: &UploadResult) -> String {
    let metadata = &result.metadata;
    [
        "File uploaded successfully!".to_string(),
        String::new(),
        "Upload Details:".to_string(),
        format!("  Original Name: {}", metadata.original_filename),
        format!("  File Size:     {} MB", metadata.file_size_mb),
        format!("  Content Type:  {}", metadata.display_content_type()),
        format!("  Category:      {}", metadata.category),
        format!("  Upload Time:   {}", metadata.display_upload_time()),
        format!("  Unique ID:     {}", metadata.unique_filename),
        String::new(),
        format!("File URL: {}", result.url),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedrop_core::{FileCategory, UploadMetadata};

    #[test]
    fn test_file_details() {
        let file = SelectedFile::new("/tmp/photo.png", "photo.png", 2 * 1024 * 1024, "image/png");
        let rendered = file_details(&file);
        assert!(rendered.contains("File:     photo.png"));
        assert!(rendered.contains("Size:     2 MB"));
        assert!(rendered.contains("Type:     image/png"));
        assert!(rendered.contains("Category: image"));
    }

    #[test]
    fn test_file_details_unknown_type() {
        let file = SelectedFile::new("/tmp/data.bin", "data.bin", 0, "");
        let rendered = file_details(&file);
        assert!(rendered.contains("Size:     0 Bytes"));
        assert!(rendered.contains("Type:     Unknown"));
        assert!(rendered.contains("Category: unknown"));
    }

    #[test]
    fn test_upload_label() {
        assert_eq!(upload_label(false, 0), "Upload File");
        assert_eq!(upload_label(true, 42), "Uploading... 42%");
    }

    #[test]
    fn test_success_details() {
        let result = UploadResult {
            url: "https://cdn/x".to_string(),
            metadata: UploadMetadata {
                original_filename: "photo.png".to_string(),
                file_size: Some(2 * 1024 * 1024),
                file_size_mb: 2.0,
                content_type: Some("image/png".to_string()),
                category: FileCategory::Image,
                upload_time: "2024-01-01T10:00:00".to_string(),
                unique_filename: "abc123.png".to_string(),
            },
        };

        let rendered = success_details(&result);
        assert!(rendered.starts_with("File uploaded successfully!"));
        assert!(rendered.contains("Original Name: photo.png"));
        assert!(rendered.contains("File Size:     2 MB"));
        assert!(rendered.contains("Content Type:  image/png"));
        assert!(rendered.contains("Category:      image"));
        assert!(rendered.contains("Upload Time:   2024-01-01 10:00:00"));
        assert!(rendered.contains("Unique ID:     abc123.png"));
        assert!(rendered.ends_with("File URL: https://cdn/x"));
    }
}
