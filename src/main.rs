mod cli;

use crate::cli::{Cli, Commands};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use photo_courier::{ClientConfig, ServerConfig};
use photo_courier::application::use_cases::{RunServerUseCase, SendPhotoUseCase};
use photo_courier::debug::{DebugConfig, init_logging, log_error_details};
use photo_courier::domain::upload::UploadEndpoint;
use photo_courier::infrastructure::capture::FileCaptureDevice;
use photo_courier::infrastructure::http::ReqwestPhotoUploader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let debug_config = match (&cli.log_dir, cli.verbose) {
        (Some(dir), _) => DebugConfig::production(dir.clone()),
        (None, true) => DebugConfig::development(),
        (None, false) => DebugConfig::default(),
    };
    if let Err(e) = init_logging(&debug_config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match cli.command {
        Commands::Serve {
            port,
            host,
            staging_dir,
            public_dir,
            max_upload_bytes,
        } => {
            info!("Starting ingest server...");
            // --port wins over $PORT
            let mut config = ServerConfig {
                host,
                staging_dir,
                public_dir,
                max_upload_bytes,
                ..ServerConfig::from_env()
            };
            if let Some(port) = port {
                config.port = port;
            }
            let use_case = RunServerUseCase::new(config);

            if let Err(e) = use_case.execute().await {
                log_error_details(e.as_ref(), "serve");
                eprintln!("❌ Server failed: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Send {
            image,
            title,
            endpoint,
            capture_dir,
        } => {
            let defaults = ClientConfig::default();
            let endpoint: UploadEndpoint = endpoint.unwrap_or(defaults.endpoint).parse()?;
            let capture_dir = capture_dir.unwrap_or(defaults.capture_dir);

            // Dependency injection
            let device = Arc::new(FileCaptureDevice::new(image, capture_dir));
            let uploader = Arc::new(ReqwestPhotoUploader::new());
            let use_case = SendPhotoUseCase::new(device, uploader, endpoint);

            let (snapshot, result) = use_case.execute(&title).await;
            match result {
                Ok(()) => {
                    println!("✅ Photo '{}' uploaded", title);
                }
                Err(e) => {
                    error!("Send failed in {} mode: {}", snapshot.mode, e);
                    log_error_details(&e, "send");
                    eprintln!("❌ Upload failed: {}", e);
                    if let Some(uri) = snapshot.photo_uri {
                        eprintln!("   The captured photo is kept at {}", uri);
                    }
                    if e.is_recoverable() {
                        eprintln!("   This may be temporary; run the command again to retry");
                    }
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
