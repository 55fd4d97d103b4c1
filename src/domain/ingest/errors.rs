use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("No file uploaded in field '{0}'")]
    MissingFilePart(&'static str),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("Upload exceeds the size limit: {0}")]
    PayloadTooLarge(String),

    #[error("Malformed multipart request: {0}")]
    MalformedRequest(String),

    #[error("Failed to stage upload: {0}")]
    StagingFailed(String),

    #[error("Failed to commit '{file_name}' to the public store: {source}")]
    StagingCommitFailure {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// クライアント側の問題による失敗か
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IngestError::MissingFilePart(_)
                | IngestError::InvalidFileName(_)
                | IngestError::PayloadTooLarge(_)
                | IngestError::MalformedRequest(_)
        )
    }
}
