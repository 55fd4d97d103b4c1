use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Capture device busy")]
    DeviceBusy,

    #[error("Capture source not available: {0}")]
    SourceUnavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CaptureError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CaptureError::DeviceBusy | CaptureError::IoError(_))
    }
}
