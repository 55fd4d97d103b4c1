use super::{IngestError, StagedPhoto, StoredFile, StoredFileName};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// 受信したアップロードのバイト列
pub type UploadBody<'a> = BoxStream<'a, Result<Bytes, IngestError>>;

/// 写真の保存先
///
/// ステージングはサーバーが生成した名前で行い、クライアント由来の名前は
/// 公開ストアへの確定時にのみ使用する。
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// 受信ストリームを一時領域に書き出す
    async fn stage<'a>(&self, body: UploadBody<'a>) -> Result<StagedPhoto, IngestError>;

    /// 一時ファイルを公開ストアへコピーする（同名ファイルは上書き）
    async fn commit(
        &self,
        staged: &StagedPhoto,
        file_name: &StoredFileName,
    ) -> Result<StoredFile, IngestError>;

    /// 一時ファイルを削除する
    async fn discard(&self, staged: &StagedPhoto) -> Result<(), IngestError>;
}
