use crate::domain::capture::{CaptureDevice, CaptureError, CaptureOptions, CapturedPhoto, PhotoHandle};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Capture device backed by an image file on disk.
///
/// Each capture copies the source image into `capture_dir` under a freshly
/// generated name, the way a camera driver hands back a new local file.
pub struct FileCaptureDevice {
    source: PathBuf,
    capture_dir: PathBuf,
}

impl FileCaptureDevice {
    pub fn new(source: impl Into<PathBuf>, capture_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            capture_dir: capture_dir.into(),
        }
    }
}

#[async_trait]
impl CaptureDevice for FileCaptureDevice {
    async fn request_permission(&self) -> bool {
        // Readable source is the file-backed equivalent of a granted camera
        match tokio::fs::metadata(&self.source).await {
            Ok(meta) if meta.is_file() => true,
            Ok(_) => {
                warn!("Capture source is not a file: {}", self.source.display());
                false
            }
            Err(e) => {
                warn!("Capture source {} unavailable: {}", self.source.display(), e);
                false
            }
        }
    }

    async fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError> {
        if !tokio::fs::try_exists(&self.source).await? {
            return Err(CaptureError::SourceUnavailable(
                self.source.display().to_string(),
            ));
        }

        tokio::fs::create_dir_all(&self.capture_dir).await?;

        let handle = PhotoHandle::generate();
        let target = self
            .capture_dir
            .join(format!("{handle}.{}", options.format.extension()));
        let bytes = tokio::fs::copy(&self.source, &target).await?;

        info!("Captured {} bytes to {}", bytes, target.display());
        debug!("Capture options: {:?}", options);

        Ok(CapturedPhoto {
            handle,
            uri: target.display().to_string(),
            captured_at: Utc::now(),
        })
    }
}
