use crate::domain::capture::{CaptureDevice, CaptureError, CaptureOptions, CapturedPhoto};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info};

/// Capture device for tests and simulation. Photos point at `mock://` URIs.
pub struct MockCaptureDevice {
    permission_granted: AtomicBool,
    fail_next_capture: AtomicBool,
    captures: AtomicUsize,
}

impl Default for MockCaptureDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCaptureDevice {
    pub fn new() -> Self {
        Self {
            permission_granted: AtomicBool::new(true),
            fail_next_capture: AtomicBool::new(false),
            captures: AtomicUsize::new(0),
        }
    }

    pub fn set_permission(&self, granted: bool) {
        self.permission_granted.store(granted, Ordering::SeqCst);
    }

    /// Makes the next capture report a busy device
    pub fn fail_next_capture(&self) {
        self.fail_next_capture.store(true, Ordering::SeqCst);
    }

    pub fn capture_count(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptureDevice for MockCaptureDevice {
    async fn request_permission(&self) -> bool {
        let granted = self.permission_granted.load(Ordering::SeqCst);
        info!("Mock camera permission: {}", granted);
        granted
    }

    async fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError> {
        if self.fail_next_capture.swap(false, Ordering::SeqCst) {
            return Err(CaptureError::DeviceBusy);
        }

        let n = self.captures.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Mock capture #{} (silent: {})", n, options.silent);
        Ok(CapturedPhoto::new(format!(
            "mock://capture/{n}.{}",
            options.format.extension()
        )))
    }
}
