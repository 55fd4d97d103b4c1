//! アップロード集約
//!
//! 写真のラベル、ファイル名への正規化、送信リクエストとアップローダーの契約

pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use errors::*;
pub use repositories::*;
pub use value_objects::*;
