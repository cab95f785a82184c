//! `POST /upload`: stream one file and map the response.

use filedrop_core::models::UploadErrorBody;
use filedrop_core::{ErrorMetadata, LogLevel, SelectedFile, UploadError, UploadResult};
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;

use crate::progress::{ProgressReporter, ProgressSender};
use crate::{UploadClient, FILE_FIELD, UPLOAD_PATH};

/// Read size for the request body; one progress step at most per chunk.
const CHUNK_SIZE: usize = 64 * 1024;

impl UploadClient {
    /// Upload a selected file.
    ///
    /// Progress is published on `progress` while the body streams, followed by
    /// exactly one `ProgressEvent::Finished` whatever the outcome. No retry is
    /// attempted.
    pub async fn upload_file(
        &self,
        file: &SelectedFile,
        progress: ProgressSender,
    ) -> Result<UploadResult, UploadError> {
        let reporter = ProgressReporter::new(file.size, progress);

        tracing::info!(
            filename = %file.name,
            size = file.size,
            content_type = %file.content_type,
            url = %self.build_url(UPLOAD_PATH),
            "Starting upload"
        );

        let outcome = self.post_file(file, &reporter).await;
        reporter.finish();

        match &outcome {
            Ok(result) => tracing::info!(
                original_filename = %result.metadata.original_filename,
                unique_filename = %result.metadata.unique_filename,
                category = %result.metadata.category,
                file_size_mb = result.metadata.file_size_mb,
                url = %result.url,
                "Upload finished"
            ),
            Err(err) => log_upload_error(&file.name, err),
        }

        outcome
    }

    async fn post_file(
        &self,
        file: &SelectedFile,
        reporter: &ProgressReporter,
    ) -> Result<UploadResult, UploadError> {
        let handle = tokio::fs::File::open(&file.path)
            .await
            .map_err(|e| UploadError::LocalFile(format!("{}: {}", file.path.display(), e)))?;

        let chunk_reporter = reporter.clone();
        let stream = ReaderStream::with_capacity(handle.take(file.size), CHUNK_SIZE).inspect(
            move |chunk| {
                if let Ok(bytes) = chunk {
                    chunk_reporter.advance(bytes.len() as u64);
                }
            },
        );

        let mut part =
            Part::stream_with_length(Body::wrap_stream(stream), file.size).file_name(file.name.clone());
        if !file.content_type.is_empty() {
            part = part.mime_str(&file.content_type).map_err(|e| {
                UploadError::LocalFile(format!("Invalid content type {}: {}", file.content_type, e))
            })?;
        }
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .client()
            .post(self.build_url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let reason = serde_json::from_slice::<UploadErrorBody>(&body)
                .ok()
                .and_then(UploadErrorBody::reason);

            return Err(match reason {
                Some(detail) => UploadError::Server {
                    status: status.as_u16(),
                    detail,
                },
                None => UploadError::Status(status.as_u16()),
            });
        }

        response
            .json::<UploadResult>()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))
    }
}

fn log_upload_error(filename: &str, err: &UploadError) {
    match err.log_level() {
        LogLevel::Debug => {
            tracing::debug!(filename = %filename, code = err.error_code(), error = %err, "Upload failed")
        }
        LogLevel::Warn => {
            tracing::warn!(filename = %filename, code = err.error_code(), error = %err, "Upload failed")
        }
        LogLevel::Error => {
            tracing::error!(filename = %filename, code = err.error_code(), error = %err, "Upload failed")
        }
    }
}
