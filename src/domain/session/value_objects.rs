//! キャプチャセッションの値オブジェクト

use serde::{Deserialize, Serialize};
use std::fmt;

/// 対話モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionMode {
    Idle,
    Live,
    Preview,
    Uploading,
}

impl SessionMode {
    /// このモードで写真を保持しているべきか
    pub fn holds_photo(&self) -> bool {
        matches!(self, Self::Preview | Self::Uploading)
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Live => "live",
            Self::Preview => "previewing",
            Self::Uploading => "uploading",
        };
        f.write_str(name)
    }
}

/// 描画側へ渡すセッション状態のスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub mode: SessionMode,
    pub photo_uri: Option<String>,
    pub label: String,
    pub naming_visible: bool,
    pub last_error: Option<String>,
}
