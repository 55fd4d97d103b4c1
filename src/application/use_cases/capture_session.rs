use crate::domain::capture::{CaptureDevice, CaptureOptions};
use crate::domain::session::{SessionError, SessionMode, SessionSnapshot, SessionStateMachine};
use crate::domain::upload::{PhotoUploader, UploadEndpoint};
use std::sync::Arc;
use tracing::info;

/// Drives a [`SessionStateMachine`] with a capture device and an uploader.
///
/// Every step takes `&mut self`, so at most one capture or upload is in
/// flight for a session.
pub struct CaptureSessionService {
    device: Arc<dyn CaptureDevice>,
    uploader: Arc<dyn PhotoUploader>,
    endpoint: UploadEndpoint,
    options: CaptureOptions,
    machine: SessionStateMachine,
}

impl CaptureSessionService {
    pub fn new(
        device: Arc<dyn CaptureDevice>,
        uploader: Arc<dyn PhotoUploader>,
        endpoint: UploadEndpoint,
    ) -> Self {
        Self {
            device,
            uploader,
            endpoint,
            options: CaptureOptions::default(),
            machine: SessionStateMachine::new(),
        }
    }

    pub fn session(&self) -> &SessionStateMachine {
        &self.machine
    }

    pub fn mode(&self) -> SessionMode {
        self.machine.mode()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.machine.snapshot()
    }

    /// Ask for camera permission and open the camera
    pub async fn activate(&mut self) -> Result<(), SessionError> {
        // Reject before prompting if the camera is already open
        if self.machine.mode() != SessionMode::Idle {
            return Err(SessionError::InvalidTransition {
                action: "activate the camera",
                mode: self.machine.mode(),
            });
        }
        let granted = self.device.request_permission().await;
        self.machine.activate(granted)
    }

    pub fn close_camera(&mut self) -> Result<(), SessionError> {
        self.machine.close_camera()
    }

    pub async fn capture(&mut self) -> Result<(), SessionError> {
        self.machine.ensure_can_capture()?;
        let outcome = self.device.capture(&self.options).await;
        self.machine.complete_capture(outcome)
    }

    pub fn confirm_label(&mut self, title: &str) -> Result<(), SessionError> {
        self.machine.confirm_label(title)
    }

    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.machine.cancel()
    }

    /// Upload the pending photo once. On failure the photo stays in preview.
    pub async fn upload(&mut self) -> Result<(), SessionError> {
        let (photo, label) = self.machine.begin_upload()?;
        info!("Uploading photo {} as '{}'", photo.handle, label);
        let outcome = self.uploader.upload(&photo, &label, &self.endpoint).await;
        self.machine.complete_upload(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capture::CapturedPhoto;
    use crate::domain::upload::{PhotoLabel, UploadError};
    use crate::infrastructure::capture::MockCaptureDevice;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    /// Uploader double that records calls and answers with a fixed status
    struct RecordingUploader {
        calls: Mutex<Vec<(String, String)>>,
        reject_with: Option<u16>,
    }

    impl RecordingUploader {
        fn accepting() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reject_with: None,
            }
        }

        fn rejecting(status: u16) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reject_with: Some(status),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PhotoUploader for RecordingUploader {
        async fn upload(
            &self,
            photo: &CapturedPhoto,
            label: &PhotoLabel,
            _endpoint: &UploadEndpoint,
        ) -> Result<(), UploadError> {
            let file_name = label.file_name()?;
            self.calls
                .lock()
                .unwrap()
                .push((photo.uri.clone(), file_name));
            match self.reject_with {
                Some(status) => Err(UploadError::ServerRejected {
                    status,
                    message: "Error while saving file".to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    fn service(
        device: Arc<MockCaptureDevice>,
        uploader: Arc<RecordingUploader>,
    ) -> CaptureSessionService {
        CaptureSessionService::new(
            device,
            uploader,
            "http://127.0.0.1:3001/upload".parse().unwrap(),
        )
    }

    fn assert_invariant(service: &CaptureSessionService) {
        let session = service.session();
        assert_eq!(session.mode().holds_photo(), session.photo().is_some());
    }

    #[tokio::test]
    async fn test_capture_label_upload() {
        let device = Arc::new(MockCaptureDevice::new());
        let uploader = Arc::new(RecordingUploader::accepting());
        let mut session = service(device.clone(), uploader.clone());

        assert_ok!(session.activate().await);
        assert_invariant(&session);
        assert_ok!(session.capture().await);
        assert_invariant(&session);
        assert_ok!(session.confirm_label("My Photo"));
        assert_ok!(session.upload().await);
        assert_invariant(&session);

        assert_eq!(session.mode(), SessionMode::Idle);
        assert_eq!(
            uploader.calls(),
            vec![("mock://capture/1.jpg".to_string(), "My_Photo.jpg".to_string())]
        );
    }

    #[tokio::test]
    async fn test_permission_denied() {
        let device = Arc::new(MockCaptureDevice::new());
        device.set_permission(false);
        let mut session = service(device.clone(), Arc::new(RecordingUploader::accepting()));

        let result = session.activate().await;
        assert!(matches!(result, Err(SessionError::PermissionDenied)));
        assert_eq!(session.mode(), SessionMode::Idle);

        device.set_permission(true);
        assert_ok!(session.activate().await);
        assert_eq!(session.mode(), SessionMode::Live);
    }

    #[tokio::test]
    async fn test_capture_failure_keeps_camera_open() {
        let device = Arc::new(MockCaptureDevice::new());
        let mut session = service(device.clone(), Arc::new(RecordingUploader::accepting()));
        session.activate().await.unwrap();

        device.fail_next_capture();
        assert_err!(session.capture().await);
        assert_eq!(session.mode(), SessionMode::Live);
        assert_invariant(&session);

        assert_ok!(session.capture().await);
        assert_eq!(session.mode(), SessionMode::Preview);
    }

    #[tokio::test]
    async fn test_capture_requires_live_camera() {
        let device = Arc::new(MockCaptureDevice::new());
        let mut session = service(device.clone(), Arc::new(RecordingUploader::accepting()));

        assert_err!(session.capture().await);
        assert_eq!(device.capture_count(), 0);

        session.activate().await.unwrap();
        session.capture().await.unwrap();
        // A pending photo blocks a second capture
        assert_err!(session.capture().await);
        assert_eq!(device.capture_count(), 1);
    }

    #[tokio::test]
    async fn test_cancel_discards_without_upload() {
        let uploader = Arc::new(RecordingUploader::accepting());
        let mut session = service(Arc::new(MockCaptureDevice::new()), uploader.clone());
        session.activate().await.unwrap();
        session.capture().await.unwrap();

        assert_ok!(session.cancel());
        assert_eq!(session.mode(), SessionMode::Idle);
        assert!(session.session().photo().is_none());
        assert!(uploader.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_label_never_reaches_uploader() {
        let uploader = Arc::new(RecordingUploader::accepting());
        let mut session = service(Arc::new(MockCaptureDevice::new()), uploader.clone());
        session.activate().await.unwrap();
        session.capture().await.unwrap();
        session.confirm_label("").unwrap();

        let result = session.upload().await;
        assert!(matches!(result, Err(SessionError::InvalidLabel(_))));
        assert_eq!(session.mode(), SessionMode::Preview);
        assert!(session.snapshot().naming_visible);
        assert!(uploader.calls().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_returns_to_preview() {
        let uploader = Arc::new(RecordingUploader::rejecting(500));
        let mut session = service(Arc::new(MockCaptureDevice::new()), uploader.clone());
        session.activate().await.unwrap();
        session.capture().await.unwrap();
        session.confirm_label("Test").unwrap();

        let result = session.upload().await;
        assert!(matches!(
            result,
            Err(SessionError::Upload(UploadError::ServerRejected { status: 500, .. }))
        ));
        assert_eq!(session.mode(), SessionMode::Preview);
        assert_eq!(session.session().label().title(), "Test");
        assert_eq!(
            session.session().photo().map(|p| p.uri.as_str()),
            Some("mock://capture/1.jpg")
        );
        assert_invariant(&session);

        // Exactly one attempt; retrying is a new user action
        assert_eq!(uploader.calls().len(), 1);
        let _ = session.upload().await;
        assert_eq!(uploader.calls().len(), 2);
    }
}
