//! キャプチャセッション集約
//!
//! カメラ起動から写真の破棄・送信完了までの対話状態を管理する

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
