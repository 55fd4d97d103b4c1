use super::{PhotoLabel, UploadEndpoint, UploadError};
use crate::domain::capture::CapturedPhoto;
use async_trait::async_trait;

/// 写真をサーバーへ送信するクライアント
///
/// 一回の呼び出しで送信は一度だけ行い、自動再試行はしない。
/// 写真とラベルは変更しない。
#[async_trait]
pub trait PhotoUploader: Send + Sync {
    async fn upload(
        &self,
        photo: &CapturedPhoto,
        label: &PhotoLabel,
        endpoint: &UploadEndpoint,
    ) -> Result<(), UploadError>;
}
