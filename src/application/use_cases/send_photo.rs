use super::capture_session::CaptureSessionService;
use crate::domain::capture::CaptureDevice;
use crate::domain::session::{SessionError, SessionSnapshot};
use crate::domain::upload::{PhotoUploader, UploadEndpoint};
use std::sync::Arc;
use tracing::{info, warn};

/// Run one complete capture session: open the camera, take a photo, name it
/// and upload it.
pub struct SendPhotoUseCase {
    device: Arc<dyn CaptureDevice>,
    uploader: Arc<dyn PhotoUploader>,
    endpoint: UploadEndpoint,
}

impl SendPhotoUseCase {
    pub fn new(
        device: Arc<dyn CaptureDevice>,
        uploader: Arc<dyn PhotoUploader>,
        endpoint: UploadEndpoint,
    ) -> Self {
        Self {
            device,
            uploader,
            endpoint,
        }
    }

    /// Returns the session state after the attempt, alongside the outcome
    pub async fn execute(&self, title: &str) -> (SessionSnapshot, Result<(), SessionError>) {
        let mut session = CaptureSessionService::new(
            self.device.clone(),
            self.uploader.clone(),
            self.endpoint.clone(),
        );

        let result = Self::run(&mut session, title).await;
        match &result {
            Ok(()) => info!("Photo '{}' sent to {}", title, self.endpoint),
            Err(e) => warn!("Sending photo '{}' failed: {}", title, e),
        }
        (session.snapshot(), result)
    }

    async fn run(session: &mut CaptureSessionService, title: &str) -> Result<(), SessionError> {
        session.activate().await?;
        session.capture().await?;
        session.confirm_label(title)?;
        session.upload().await
    }
}
