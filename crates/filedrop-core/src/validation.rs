//! Client-side upload rules.
//!
//! Validation looks at the filename and byte size only. It never opens the
//! file and never touches the network.

use crate::error::ValidationError;
use crate::models::{file_extension, FileCategory, SelectedFile};
use crate::presentation::format_megabytes;

/// Default ceiling: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Outcome of validating a selected file.
pub type ValidationResult = Result<SelectedFile, ValidationError>;

/// Allow-list and size ceiling applied before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRules {
    allowed_extensions: Vec<String>,
    max_file_size_bytes: u64,
}

impl Default for UploadRules {
    /// Every extension of the five categories, 5 MiB ceiling.
    fn default() -> Self {
        let allowed_extensions = FileCategory::KNOWN
            .into_iter()
            .flat_map(|category| category.extensions().iter())
            .map(|ext| ext.to_string())
            .collect();

        Self::new(allowed_extensions, DEFAULT_MAX_FILE_SIZE_BYTES)
    }
}

impl UploadRules {
    pub fn new(allowed_extensions: Vec<String>, max_file_size_bytes: u64) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.trim().to_lowercase())
                .collect(),
            max_file_size_bytes,
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// Validate file extension
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = file_extension(filename);

        if extension.is_empty() || !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::UnsupportedExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size_bytes {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size_bytes,
            });
        }

        Ok(())
    }

    /// Extension first, then size.
    pub fn validate_all(&self, filename: &str, size: u64) -> Result<(), ValidationError> {
        self.validate_extension(filename)?;
        self.validate_file_size(size)?;
        Ok(())
    }

    /// Upload guidelines text. Generated from the enforced rules so the
    /// displayed ceiling can never drift from the one applied.
    pub fn guidelines(&self) -> String {
        let mut lines = vec![
            "Upload Guidelines:".to_string(),
            format!(
                "  - Maximum file size: {}MB",
                format_megabytes(self.max_file_size_bytes)
            ),
            "  - Supported formats:".to_string(),
        ];

        for category in FileCategory::KNOWN {
            let allowed: Vec<String> = category
                .extensions()
                .iter()
                .filter(|ext| self.allowed_extensions.iter().any(|a| a == *ext))
                .map(|ext| ext.to_uppercase())
                .collect();
            if !allowed.is_empty() {
                lines.push(format!("      {}: {}", category.heading(), allowed.join(", ")));
            }
        }

        lines.join("\n")
    }
}

/// Accept or reject a selected file against the rules.
pub fn validate(file: SelectedFile, rules: &UploadRules) -> ValidationResult {
    match rules.validate_all(&file.name, file.size) {
        Ok(()) => Ok(file),
        Err(err) => {
            tracing::debug!(
                filename = %file.name,
                size = file.size,
                error = %err,
                "Selected file rejected"
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    fn file(name: &str, size: u64) -> SelectedFile {
        SelectedFile::new(format!("/tmp/{}", name), name, size, "")
    }

    #[test]
    fn test_default_rules() {
        let rules = UploadRules::default();
        assert_eq!(rules.max_file_size_bytes(), 5 * MB);
        assert_eq!(rules.allowed_extensions().len(), 27);
        assert_eq!(rules.allowed_extensions()[0], "jpg");
        assert!(rules.allowed_extensions().contains(&"7z".to_string()));
    }

    #[test]
    fn test_accepts_allowed_file_within_ceiling() {
        let rules = UploadRules::default();
        let accepted = validate(file("photo.png", 2 * MB), &rules).unwrap();
        assert_eq!(accepted.name, "photo.png");
        assert_eq!(accepted.category(), FileCategory::Image);
    }

    #[test]
    fn test_accepts_exactly_at_ceiling_and_empty_files() {
        let rules = UploadRules::default();
        assert!(validate(file("a.pdf", 5 * MB), &rules).is_ok());
        assert!(validate(file("a.pdf", 0), &rules).is_ok());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let rules = UploadRules::default();
        assert!(validate(file("PHOTO.JPG", MB), &rules).is_ok());
    }

    #[test]
    fn test_rejects_disallowed_extension() {
        let rules = UploadRules::default();
        let err = validate(file("malware.exe", 10), &rules).unwrap_err();
        match &err {
            ValidationError::UnsupportedExtension { extension, allowed } => {
                assert_eq!(extension, "exe");
                assert_eq!(allowed, rules.allowed_extensions());
            }
            other => panic!("unexpected error: {:?}", other),
        }
        let message = err.to_string();
        for ext in rules.allowed_extensions() {
            assert!(message.contains(ext.as_str()));
        }
    }

    #[test]
    fn test_rejects_missing_extension() {
        let rules = UploadRules::default();
        assert!(matches!(
            validate(file("README", 10), &rules),
            Err(ValidationError::UnsupportedExtension { .. })
        ));
        assert!(validate(file("archive.", 10), &rules).is_err());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let rules = UploadRules::default();
        let err = validate(file("video.mp4", 6 * MB), &rules).unwrap_err();
        assert_eq!(
            err,
            ValidationError::FileTooLarge {
                size: 6 * MB,
                max: 5 * MB
            }
        );
        assert!(err.to_string().contains("5MB"));
    }

    #[test]
    fn test_extension_checked_before_size() {
        let rules = UploadRules::default();
        assert!(matches!(
            validate(file("huge.exe", 100 * MB), &rules),
            Err(ValidationError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn test_custom_rules_are_normalized() {
        let rules = UploadRules::new(vec![" PNG ".to_string()], MB);
        assert_eq!(rules.allowed_extensions(), ["png".to_string()]);
        assert!(validate(file("a.png", MB), &rules).is_ok());
        assert!(validate(file("a.jpg", MB), &rules).is_err());
    }

    #[test]
    fn test_guidelines_match_enforced_ceiling() {
        let guidelines = UploadRules::default().guidelines();
        assert!(guidelines.contains("Maximum file size: 5MB"));
        assert!(guidelines.contains("Images: JPG, JPEG, PNG, GIF, BMP, WEBP"));
        assert!(guidelines.contains("Audio: MP3, WAV, FLAC, AAC, OGG"));

        let guidelines = UploadRules::new(vec!["png".to_string()], 10 * MB).guidelines();
        assert!(guidelines.contains("Maximum file size: 10MB"));
        assert!(guidelines.contains("Images: PNG"));
        assert!(!guidelines.contains("Documents"));
    }
}
