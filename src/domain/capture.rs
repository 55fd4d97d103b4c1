//! キャプチャ集約
//!
//! カメラデバイスとの契約と、撮影された写真を表す値オブジェクト

pub mod device;
pub mod errors;
pub mod value_objects;

pub use device::*;
pub use errors::*;
pub use value_objects::*;
