use super::{UploadState, upload_photo};
use crate::ServerConfig;
use crate::application::use_cases::IngestPhotoUseCase;
use crate::infrastructure::storage::LocalPhotoStore;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Hidden entries (in-flight `.incoming-*` copies among them) are never served
async fn hide_dotfiles(request: Request, next: Next) -> Response {
    let hidden = request.uri().path().split('/').any(|segment| {
        segment.starts_with('.') || segment.to_ascii_lowercase().starts_with("%2e")
    });
    if hidden {
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(request).await
}

/// Build the application router for the given store.
///
/// The public directory is served read-only as the fallback, so committed
/// photos are reachable at `/<file name>`.
pub fn create_router(store: Arc<LocalPhotoStore>, max_upload_bytes: usize) -> Router {
    let public_dir = store.public_dir().to_path_buf();
    let state = Arc::new(UploadState::new(IngestPhotoUseCase::new(store)));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/upload", post(upload_photo))
        .with_state(state)
        .fallback_service(ServeDir::new(public_dir))
        .layer(middleware::from_fn(hide_dotfiles))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_upload_bytes))
                .layer(CorsLayer::permissive()),
        )
}

pub async fn create_server(config: ServerConfig) -> anyhow::Result<()> {
    info!("Starting photo ingest server...");

    // Parse socket address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let store = Arc::new(LocalPhotoStore::new(&config.staging_dir, &config.public_dir));
    store.ensure_directories().await?;
    info!(
        "Staging uploads in {}, publishing to {}",
        store.staging_dir().display(),
        store.public_dir().display()
    );

    let app = create_router(store, config.max_upload_bytes);

    // Create TCP listener
    let listener = TcpListener::bind(&addr).await?;

    println!("🌐 Server started running on port {}", config.port);
    println!("   Upload: POST http://{addr}/upload");
    println!("   Press Ctrl+C to stop");

    // Run the server
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
