//! 取り込み集約の値オブジェクト

use super::IngestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

/// 公開ストア内のファイル名
///
/// クライアントが送った名前をそのまま使う。正規化はしないが、
/// ストアのディレクトリ外を指す名前は受け付けない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoredFileName(String);

impl StoredFileName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoredFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StoredFileName {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "." || s == ".." {
            return Err(IngestError::InvalidFileName(format!("'{s}'")));
        }
        if s.contains(['/', '\\', '\0']) {
            return Err(IngestError::InvalidFileName(format!(
                "'{s}' must not contain path separators"
            )));
        }
        Ok(Self(s.to_string()))
    }
}

/// ステージング済みの一時ファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedPhoto {
    pub id: Uuid,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub md5: String,
}

/// 公開ストアに確定したファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub file_name: StoredFileName,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub md5: String,
}
