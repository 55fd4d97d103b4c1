use super::SessionMode;
use crate::domain::capture::CaptureError;
use crate::domain::upload::UploadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("Capture failed: {0}")]
    CaptureFailed(#[source] CaptureError),

    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    #[error("Cannot {action} while {mode}")]
    InvalidTransition {
        action: &'static str,
        mode: SessionMode,
    },

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),
}

impl SessionError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            SessionError::CaptureFailed(_) | SessionError::InvalidLabel(_) => true,
            SessionError::Upload(e) => e.is_recoverable(),
            _ => false,
        }
    }
}
