//! Error types module
//!
//! Three families of errors exist, one per stage of an upload attempt:
//! `ValidationError` (client-side rules, before any network call),
//! `UploadError` (submission) and `SessionError` (transitions refused by the
//! state machine). `ErrorMetadata` describes how each one is presented.

use crate::presentation::format_megabytes;

/// Message shown whenever the server did not supply a readable reason.
pub const GENERIC_UPLOAD_FAILURE: &str = "Upload failed. Please try again.";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a rejected upload
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "FILE_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// User-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// A selected file broke one of the upload rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File type not allowed. Supported types: {}", allowed.join(", "))]
    UnsupportedExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("File too large. Maximum size is {}MB", format_megabytes(*max))]
    FileTooLarge { size: u64, max: u64 },
}

/// A submission ended without an `UploadResult`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to read local file: {0}")]
    LocalFile(String),

    #[error("Upload rejected with status {0}")]
    Status(u16),

    #[error("Upload rejected with status {status}: {detail}")]
    Server { status: u16, detail: String },

    #[error("Invalid upload response: {0}")]
    InvalidResponse(String),
}

/// A transition the upload session refused to perform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("An upload is already in progress")]
    UploadInProgress,
}

impl ErrorMetadata for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            ValidationError::UnsupportedExtension { .. } => "UNSUPPORTED_EXTENSION",
            ValidationError::FileTooLarge { .. } => "FILE_TOO_LARGE",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            UploadError::Transport(_) => "TRANSPORT_ERROR",
            UploadError::LocalFile(_) => "LOCAL_FILE_ERROR",
            UploadError::Status(_) => "UPLOAD_REJECTED",
            UploadError::Server { .. } => "SERVER_REPORTED_ERROR",
            UploadError::InvalidResponse(_) => "INVALID_RESPONSE",
        }
    }

    /// Only a server-supplied `detail` is shown verbatim; everything else
    /// collapses into the generic fallback.
    fn client_message(&self) -> String {
        match self {
            UploadError::Server { detail, .. } => detail.clone(),
            _ => GENERIC_UPLOAD_FAILURE.to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            UploadError::Server { .. } | UploadError::Status(_) | UploadError::Transport(_) => {
                LogLevel::Warn
            }
            UploadError::LocalFile(_) | UploadError::InvalidResponse(_) => LogLevel::Error,
        }
    }
}

impl ErrorMetadata for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::UploadInProgress => "UPLOAD_IN_PROGRESS",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_lists_every_allowed_type() {
        let err = ValidationError::UnsupportedExtension {
            extension: "exe".to_string(),
            allowed: vec!["jpg".to_string(), "png".to_string(), "pdf".to_string()],
        };
        assert_eq!(
            err.client_message(),
            "File type not allowed. Supported types: jpg, png, pdf"
        );
        assert_eq!(err.error_code(), "UNSUPPORTED_EXTENSION");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_file_too_large_states_ceiling_in_mb() {
        let err = ValidationError::FileTooLarge {
            size: 6 * 1024 * 1024,
            max: 5 * 1024 * 1024,
        };
        assert_eq!(err.client_message(), "File too large. Maximum size is 5MB");

        let err = ValidationError::FileTooLarge {
            size: 3 * 1024 * 1024,
            max: 2_621_440,
        };
        assert_eq!(err.client_message(), "File too large. Maximum size is 2.5MB");
    }

    #[test]
    fn test_validation_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ValidationError::FileTooLarge {
            size: 6 * 1024 * 1024,
            max: 5 * 1024 * 1024,
        });
        assert_eq!(err.to_string(), "File too large. Maximum size is 5MB");
    }

    #[test]
    fn test_server_detail_is_shown_verbatim() {
        let err = UploadError::Server {
            status: 500,
            detail: "disk full".to_string(),
        };
        assert_eq!(err.client_message(), "disk full");
        assert_eq!(err.error_code(), "SERVER_REPORTED_ERROR");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_other_upload_errors_use_generic_message() {
        for err in [
            UploadError::Transport("connection refused".to_string()),
            UploadError::LocalFile("permission denied".to_string()),
            UploadError::Status(500),
            UploadError::InvalidResponse("missing field `url`".to_string()),
        ] {
            assert_eq!(err.client_message(), GENERIC_UPLOAD_FAILURE);
        }
    }

    #[test]
    fn test_internal_message_keeps_details() {
        let err = UploadError::Transport("timed out".to_string());
        assert_eq!(err.to_string(), "Transport error: timed out");
    }
}
