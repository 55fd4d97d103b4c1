pub mod local_photo_store;

pub use local_photo_store::LocalPhotoStore;
