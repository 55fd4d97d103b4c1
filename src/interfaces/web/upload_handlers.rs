use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::error_response::ErrorResponse;
use crate::application::use_cases::IngestPhotoUseCase;
use crate::domain::ingest::IngestError;
use crate::domain::upload::PHOTO_FIELD_NAME;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File saved successfully";

pub struct UploadState {
    pub ingest: IngestPhotoUseCase,
}

impl UploadState {
    pub fn new(ingest: IngestPhotoUseCase) -> Self {
        Self { ingest }
    }
}

fn multipart_error(e: MultipartError) -> IngestError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        IngestError::PayloadTooLarge(e.body_text())
    } else {
        IngestError::MalformedRequest(e.body_text())
    }
}

/// Receive a photo in the `photo` multipart field
pub async fn upload_photo(
    State(state): State<Arc<UploadState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, &'static str), ErrorResponse> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read multipart field: {}", e);
                return Err(multipart_error(e).into());
            }
        };

        let field_name = field.name().unwrap_or("").to_string();
        // Only file parts count as an upload
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            debug!("Skipping non-file field '{}'", field_name);
            continue;
        };
        if field_name != PHOTO_FIELD_NAME {
            debug!("Skipping file field '{}'", field_name);
            continue;
        }

        info!(
            file_name = %file_name,
            content_type = field.content_type().unwrap_or("unknown"),
            "Incoming photo upload"
        );

        let body = field.map_err(multipart_error).boxed();
        return match state.ingest.execute(Some(&file_name), body).await {
            Ok(stored) => {
                info!(
                    "Saved {} ({} bytes, md5 {})",
                    stored.file_name, stored.size_bytes, stored.md5
                );
                Ok((StatusCode::OK, UPLOAD_SUCCESS_MESSAGE))
            }
            Err(e) => {
                if e.is_client_error() {
                    warn!("Rejected upload '{}': {}", file_name, e);
                } else {
                    error!("Error while saving '{}': {}", file_name, e);
                }
                Err(e.into())
            }
        };
    }

    warn!("Upload request without a '{}' file part", PHOTO_FIELD_NAME);
    Err(IngestError::MissingFilePart(PHOTO_FIELD_NAME).into())
}
