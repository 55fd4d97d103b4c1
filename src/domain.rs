//! ドメイン層
//!
//! 撮影からアップロードまでのビジネスロジックとドメインモデルを含む層

pub mod capture;
pub mod ingest;
pub mod session;
pub mod upload;
