//! # Photo Courier
//!
//! 端末で撮影した写真に名前を付け、コンパニオンサーバーへ送信して
//! 公開ストアに保存するパイプライン
//!
//! このクレートは以下の層に分かれています：
//!
//! - **Domain Layer**: キャプチャセッションの状態機械、ラベル正規化、取り込みのモデル
//! - **Application Layer**: セッションの駆動、取り込み、サーバー起動のユースケース
//! - **Infrastructure Layer**: ファイルシステム、HTTPクライアント、カメラとの統合
//! - **Interface Layer**: 取り込みサーバーの HTTP エンドポイント

pub mod application;
pub mod debug;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

// 公開API
pub use domain::*;

use std::path::PathBuf;

/// 待ち受けポートの既定値
pub const DEFAULT_PORT: u16 = 3001;
/// アップロードの一時保存先
pub const DEFAULT_STAGING_DIR: &str = "tmp";
/// 公開ストア
pub const DEFAULT_PUBLIC_DIR: &str = "public";
/// リクエストボディの上限（20 MiB）
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// 取り込みサーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub staging_dir: PathBuf,
    pub public_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// 環境変数 `PORT` でポートを上書きした設定
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の変数ソースから設定を組み立てる
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::default().with_port_override(lookup("PORT").as_deref())
    }

    /// 数値として解釈できない値は無視する
    pub fn with_port_override(mut self, port: Option<&str>) -> Self {
        if let Some(port) = port.and_then(|p| p.trim().parse().ok()) {
            self.port = port;
        }
        self
    }
}

/// 送信側の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub capture_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: format!("http://127.0.0.1:{DEFAULT_PORT}/upload"),
            capture_dir: PathBuf::from("captures"),
        }
    }
}
