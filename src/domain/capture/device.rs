use super::{CaptureError, CaptureOptions, CapturedPhoto};
use async_trait::async_trait;

/// カメラデバイスのトレイト
///
/// カメラの駆動そのものは外部の責務で、コアはこの契約のみを消費する。
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// カメラ使用の許可を要求し、許可されたかどうかを返す
    async fn request_permission(&self) -> bool;

    /// 静止画を撮影
    async fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError>;
}
