pub mod file_capture_device;
pub mod mock_capture_device;

pub use file_capture_device::FileCaptureDevice;
pub use mock_capture_device::MockCaptureDevice;
