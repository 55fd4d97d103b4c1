use crate::domain::capture::CapturedPhoto;
use crate::domain::upload::{
    PHOTO_FIELD_NAME, PhotoLabel, PhotoUploader, UploadEndpoint, UploadError, UploadRequest,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

/// Multipart photo uploader on top of `reqwest`.
///
/// Sends exactly one POST per call and relies on the client's default timeout.
#[derive(Debug, Clone, Default)]
pub struct ReqwestPhotoUploader {
    client: reqwest::Client,
}

impl ReqwestPhotoUploader {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_form(request: UploadRequest) -> Result<Form, UploadError> {
        let content_type = request.content_type();
        let part = Part::bytes(request.payload)
            .file_name(request.file_name)
            .mime_str(content_type)
            .map_err(|e| UploadError::NetworkFailure(format!("invalid content type: {e}")))?;

        Ok(Form::new().part(PHOTO_FIELD_NAME, part))
    }
}

#[async_trait]
impl PhotoUploader for ReqwestPhotoUploader {
    async fn upload(
        &self,
        photo: &CapturedPhoto,
        label: &PhotoLabel,
        endpoint: &UploadEndpoint,
    ) -> Result<(), UploadError> {
        // Validate before touching the disk or the network
        let file_name = label.file_name()?;

        let payload = tokio::fs::read(photo.local_path())
            .await
            .map_err(|source| UploadError::PhotoUnreadable {
                uri: photo.uri.clone(),
                source,
            })?;

        info!(
            "Uploading {} ({} bytes) to {}",
            file_name,
            payload.len(),
            endpoint
        );

        let form = Self::build_form(UploadRequest { payload, file_name })?;

        let response = self
            .client
            .post(endpoint.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Upload transport error: {}", e);
                UploadError::NetworkFailure(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!("Server rejected upload: {} - {}", status, body);
            return Err(UploadError::ServerRejected {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("Server response: {}", body);
        Ok(())
    }
}
