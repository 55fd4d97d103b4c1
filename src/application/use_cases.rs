pub mod capture_session;
pub mod ingest_photo;
pub mod run_server;
pub mod send_photo;

pub use capture_session::CaptureSessionService;
pub use ingest_photo::IngestPhotoUseCase;
pub use run_server::RunServerUseCase;
pub use send_photo::SendPhotoUseCase;
