pub mod reqwest_uploader;

pub use reqwest_uploader::ReqwestPhotoUploader;
