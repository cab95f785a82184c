//! filedrop core library
//!
//! This crate provides the domain models, error types, configuration, validation
//! rules and the upload state machine shared by the filedrop client and CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod presentation;
pub mod progress;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ErrorMetadata, LogLevel, SessionError, UploadError, ValidationError};
pub use models::{FileCategory, SelectedFile, UploadMetadata, UploadResult};
pub use presentation::{category_of, format_size};
pub use progress::{ProgressEvent, ProgressTracker};
pub use session::{UploadSession, UploadState};
pub use validation::{validate, UploadRules, ValidationResult};
