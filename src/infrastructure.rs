//! インフラストラクチャ層
//!
//! ファイルシステム、HTTP、カメラとの統合

pub mod capture;
pub mod http;
pub mod storage;
