//! 取り込み集約
//!
//! サーバー側で受け取った写真の一時保存（ステージング）と公開ストアへの確定

pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use errors::*;
pub use repositories::*;
pub use value_objects::*;
