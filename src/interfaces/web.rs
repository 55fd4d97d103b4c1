//! Web インターフェース
//!
//! 写真の取り込みエンドポイント `POST /upload` と、公開ストアの静的配信を提供します。

mod error_response;
mod upload_handlers;

pub mod server;

// 内部使用のため、必要な型のみを再エクスポート
pub(crate) use upload_handlers::{UploadState, upload_photo};
