//! Upload state machine.
//!
//! An `UploadSession` owns exactly one `UploadState`. It only changes through
//! `select`, `begin_upload`, `record_progress` and `complete`; a new selection
//! or a new attempt always discards the previous result or error.

use std::mem;

use crate::error::{ErrorMetadata, SessionError, UploadError, ValidationError};
use crate::models::{SelectedFile, UploadResult};
use crate::validation::{validate, UploadRules};

#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    /// Nothing selected.
    Idle,
    /// An accepted file waits for submission.
    Selected(SelectedFile),
    /// The last selection broke an upload rule.
    Rejected(ValidationError),
    Uploading {
        file: SelectedFile,
        percent: u8,
    },
    Succeeded {
        file: SelectedFile,
        result: UploadResult,
    },
    Failed {
        file: SelectedFile,
        error: UploadError,
    },
}

impl UploadState {
    pub fn name(&self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::Selected(_) => "selected",
            UploadState::Rejected(_) => "rejected",
            UploadState::Uploading { .. } => "uploading",
            UploadState::Succeeded { .. } => "succeeded",
            UploadState::Failed { .. } => "failed",
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadState::Uploading { .. })
    }
}

#[derive(Debug, Clone)]
pub struct UploadSession {
    rules: UploadRules,
    state: UploadState,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new(UploadRules::default())
    }
}

impl UploadSession {
    pub fn new(rules: UploadRules) -> Self {
        Self {
            rules,
            state: UploadState::Idle,
        }
    }

    pub fn rules(&self) -> &UploadRules {
        &self.rules
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Replace the current selection. `None` means the picker was cancelled
    /// and simply returns the session to `Idle`.
    ///
    /// Refused while an upload is in flight.
    pub fn select(&mut self, file: Option<SelectedFile>) -> Result<&UploadState, SessionError> {
        if self.state.is_uploading() {
            return Err(SessionError::UploadInProgress);
        }

        self.state = match file {
            None => UploadState::Idle,
            Some(file) => match validate(file, &self.rules) {
                Ok(accepted) => UploadState::Selected(accepted),
                Err(err) => UploadState::Rejected(err),
            },
        };

        Ok(&self.state)
    }

    /// Whether the upload trigger is enabled.
    pub fn can_upload(&self) -> bool {
        self.selected_file().is_some() && !self.state.is_uploading()
    }

    /// Start an attempt with the accepted file. Returns `None`, leaving the
    /// state untouched, when there is no accepted file or an attempt is
    /// already running.
    pub fn begin_upload(&mut self) -> Option<SelectedFile> {
        let file = match mem::replace(&mut self.state, UploadState::Idle) {
            UploadState::Selected(file)
            | UploadState::Succeeded { file, .. }
            | UploadState::Failed { file, .. } => file,
            other => {
                self.state = other;
                return None;
            }
        };

        self.state = UploadState::Uploading {
            file: file.clone(),
            percent: 0,
        };
        Some(file)
    }

    /// Apply a progress notification. Ignored outside of an attempt;
    /// never moves the percentage backwards.
    pub fn record_progress(&mut self, percent: u8) {
        if let UploadState::Uploading {
            percent: current, ..
        } = &mut self.state
        {
            *current = (*current).max(percent.min(100));
        }
    }

    /// End the running attempt. Ignored when no attempt is running.
    pub fn complete(&mut self, outcome: Result<UploadResult, UploadError>) {
        let file = match mem::replace(&mut self.state, UploadState::Idle) {
            UploadState::Uploading { file, .. } => file,
            other => {
                tracing::debug!(state = other.name(), "Ignoring completion outside an upload");
                self.state = other;
                return;
            }
        };

        self.state = match outcome {
            Ok(result) => UploadState::Succeeded { file, result },
            Err(error) => UploadState::Failed { file, error },
        };
    }

    /// Current progress. Always 0 outside of an attempt.
    pub fn progress(&self) -> u8 {
        match &self.state {
            UploadState::Uploading { percent, .. } => *percent,
            _ => 0,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.state {
            UploadState::Selected(file)
            | UploadState::Uploading { file, .. }
            | UploadState::Succeeded { file, .. }
            | UploadState::Failed { file, .. } => Some(file),
            UploadState::Idle | UploadState::Rejected(_) => None,
        }
    }

    pub fn result(&self) -> Option<&UploadResult> {
        match &self.state {
            UploadState::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    /// User-facing error for the current state, if any.
    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            UploadState::Rejected(err) => Some(err.client_message()),
            UploadState::Failed { error, .. } => Some(error.client_message()),
            _ => None,
        }
    }
}
