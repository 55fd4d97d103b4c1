//! アプリケーション層
//!
//! ドメインとインフラを組み合わせたユースケース

pub mod use_cases;
