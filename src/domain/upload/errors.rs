use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    #[error("Invalid upload endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Failed to read photo at {uri}: {source}")]
    PhotoUnreadable {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Server rejected upload ({status}): {message}")]
    ServerRejected { status: u16, message: String },
}

impl UploadError {
    /// ユーザーが手動で再試行すれば成功し得るか
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            UploadError::NetworkFailure(_) | UploadError::ServerRejected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_and_server_errors_are_recoverable() {
        assert!(UploadError::NetworkFailure("connection refused".to_string()).is_recoverable());
        assert!(
            UploadError::ServerRejected {
                status: 500,
                message: "copy failed".to_string()
            }
            .is_recoverable()
        );
    }

    #[test]
    fn test_local_errors_are_not_recoverable() {
        assert!(!UploadError::InvalidLabel("empty".to_string()).is_recoverable());
        assert!(!UploadError::InvalidEndpoint("ftp://x".to_string()).is_recoverable());
        assert!(
            !UploadError::PhotoUnreadable {
                uri: "/missing.jpg".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .is_recoverable()
        );
    }
}
