//! キャプチャ集約の値オブジェクト

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

/// 撮影された写真への不透明なハンドル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoHandle(Uuid);

impl PhotoHandle {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PhotoHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PhotoHandle {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// カメラが返す写真
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPhoto {
    pub handle: PhotoHandle,
    /// 端末ローカルで参照可能な場所
    pub uri: String,
    pub captured_at: DateTime<Utc>,
}

impl CapturedPhoto {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            handle: PhotoHandle::generate(),
            uri: uri.into(),
            captured_at: Utc::now(),
        }
    }

    /// URIをローカルファイルパスに変換（`file://` プレフィックスは省略可）
    pub fn local_path(&self) -> PathBuf {
        PathBuf::from(self.uri.strip_prefix("file://").unwrap_or(&self.uri))
    }
}

/// 撮影フォーマット
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhotoFormat {
    #[default]
    Jpeg,
}

impl PhotoFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// 撮影オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// シャッター音を鳴らさない
    pub silent: bool,
    pub format: PhotoFormat,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            silent: true,
            format: PhotoFormat::Jpeg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_handle() {
        let h1 = PhotoHandle::generate();
        let h2 = PhotoHandle::generate();
        assert_ne!(h1, h2);

        let parsed: PhotoHandle = h1.to_string().parse().unwrap();
        assert_eq!(parsed, h1);
    }

    #[test]
    fn test_local_path() {
        let photo = CapturedPhoto::new("file:///data/captures/a.jpg");
        assert_eq!(photo.local_path(), PathBuf::from("/data/captures/a.jpg"));

        let photo = CapturedPhoto::new("captures/b.jpg");
        assert_eq!(photo.local_path(), PathBuf::from("captures/b.jpg"));
    }

    #[test]
    fn test_default_options() {
        let options = CaptureOptions::default();
        assert!(options.silent);
        assert_eq!(options.format.extension(), "jpg");
        assert_eq!(options.format.mime_type(), "image/jpeg");
    }
}
