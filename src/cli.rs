use clap::{Parser, Subcommand};
use photo_courier::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PUBLIC_DIR, DEFAULT_STAGING_DIR};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "photo-courier",
    version,
    about = "Capture a photo, name it and send it to a companion server",
    long_about = "Capture a photo, name it and send it to a companion server that stages the upload and commits it to a public store"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write JSON logs to this directory instead of the console
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the ingest server
    Serve {
        /// Port to bind the server to [default: $PORT, then 3001]
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind the server to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Directory for in-flight uploads
        #[arg(long, default_value = DEFAULT_STAGING_DIR)]
        staging_dir: PathBuf,
        /// Directory of committed photos, served at the root
        #[arg(long, default_value = DEFAULT_PUBLIC_DIR)]
        public_dir: PathBuf,
        /// Maximum request body size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
        max_upload_bytes: usize,
    },
    /// Capture a photo from an image file, name it and upload it
    Send {
        /// Image file standing in for the camera sensor
        #[arg(short, long)]
        image: PathBuf,
        /// Title of the photo (at most 30 characters)
        #[arg(short, long)]
        title: String,
        /// Upload endpoint [default: http://127.0.0.1:3001/upload]
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Directory where captured photos are kept on the device [default: captures]
        #[arg(long)]
        capture_dir: Option<PathBuf>,
    },
}
