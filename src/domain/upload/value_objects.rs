//! アップロード集約の値オブジェクト

use super::UploadError;
use crate::domain::capture::PhotoFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ラベルの最大文字数
pub const MAX_LABEL_LENGTH: usize = 30;

/// ラベル未設定時のタイトル
pub const DEFAULT_LABEL: &str = "Untitled";

/// アップロード時のマルチパートフィールド名
pub const PHOTO_FIELD_NAME: &str = "photo";

/// 写真のタイトル
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoLabel {
    title: String,
}

impl PhotoLabel {
    /// 新しいラベルを作成（30文字を超える部分は切り捨て）
    pub fn new(title: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().chars().take(MAX_LABEL_LENGTH).collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// タイトルをファイル名に使える形へ正規化
    ///
    /// 前後の空白を除き、残った空白文字をアンダースコアに置き換える。
    /// 大文字小文字は変えない。
    pub fn normalize(&self) -> Result<String, UploadError> {
        let normalized: String = self
            .title
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();

        if normalized.is_empty() {
            return Err(UploadError::InvalidLabel(
                "title is empty after normalization".to_string(),
            ));
        }
        if normalized.contains(['/', '\\']) {
            return Err(UploadError::InvalidLabel(format!(
                "title must not contain path separators: {normalized}"
            )));
        }

        Ok(normalized)
    }

    /// 送信用のファイル名（`<normalized>.jpg`）
    pub fn file_name(&self) -> Result<String, UploadError> {
        Ok(format!("{}.{}", self.normalize()?, PhotoFormat::Jpeg.extension()))
    }
}

impl Default for PhotoLabel {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}

impl fmt::Display for PhotoLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// 一回の送信試行分のリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub payload: Vec<u8>,
    pub file_name: String,
}

impl UploadRequest {
    pub fn new(label: &PhotoLabel, payload: Vec<u8>) -> Result<Self, UploadError> {
        Ok(Self {
            payload,
            file_name: label.file_name()?,
        })
    }

    pub fn content_type(&self) -> &'static str {
        PhotoFormat::Jpeg.mime_type()
    }
}

/// アップロード先のURL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadEndpoint(String);

impl UploadEndpoint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UploadEndpoint {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !(s.starts_with("http://") || s.starts_with("https://")) {
            return Err(UploadError::InvalidEndpoint(format!(
                "expected an http(s) URL, got '{s}'"
            )));
        }
        Ok(Self(s.to_string()))
    }
}
