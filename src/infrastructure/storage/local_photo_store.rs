use crate::domain::ingest::{
    IngestError, PhotoStore, StagedPhoto, StoredFile, StoredFileName, UploadBody,
};
use crate::measure_time;
use async_trait::async_trait;
use futures::StreamExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Filesystem photo store: a staging directory for in-flight uploads and a
/// public directory holding committed photos.
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    staging_dir: PathBuf,
    public_dir: PathBuf,
}

impl LocalPhotoStore {
    pub fn new(staging_dir: impl Into<PathBuf>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            public_dir: public_dir.into(),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Create both directories if they do not exist yet
    pub async fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.staging_dir).await?;
        fs::create_dir_all(&self.public_dir).await?;
        Ok(())
    }

    async fn write_staged(
        &self,
        path: &Path,
        mut body: UploadBody<'_>,
    ) -> Result<(u64, String), IngestError> {
        let mut file = fs::File::create(path)
            .await
            .map_err(|e| IngestError::StagingFailed(format!("create {}: {e}", path.display())))?;

        let mut digest = md5::Context::new();
        let mut size_bytes = 0u64;

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| IngestError::StagingFailed(format!("write: {e}")))?;
            digest.consume(&chunk);
            size_bytes += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| IngestError::StagingFailed(format!("flush: {e}")))?;

        Ok((size_bytes, format!("{:x}", digest.compute())))
    }
}

async fn remove_incoming(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            warn!("Failed to remove incoming copy {}: {}", path.display(), e);
        }
    }
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn stage<'a>(&self, body: UploadBody<'a>) -> Result<StagedPhoto, IngestError> {
        fs::create_dir_all(&self.staging_dir)
            .await
            .map_err(|e| IngestError::StagingFailed(e.to_string()))?;

        let id = Uuid::new_v4();
        let path = self.staging_dir.join(format!("{id}.part"));

        match self.write_staged(&path, body).await {
            Ok((size_bytes, md5)) => {
                debug!("Staged {} bytes at {}", size_bytes, path.display());
                Ok(StagedPhoto {
                    id,
                    path,
                    size_bytes,
                    md5,
                })
            }
            Err(e) => {
                // Partial staging files are never committed
                if let Err(remove_err) = fs::remove_file(&path).await {
                    if remove_err.kind() != ErrorKind::NotFound {
                        warn!("Failed to remove partial upload {}: {}", path.display(), remove_err);
                    }
                }
                Err(e)
            }
        }
    }

    async fn commit(
        &self,
        staged: &StagedPhoto,
        file_name: &StoredFileName,
    ) -> Result<StoredFile, IngestError> {
        let commit_failure = |source: std::io::Error| IngestError::StagingCommitFailure {
            file_name: file_name.to_string(),
            source,
        };

        let destination = self.public_dir.join(file_name.as_str());
        // Copy next to the destination, then rename over it so readers never see a partial file
        let incoming = self.public_dir.join(format!(".incoming-{}", staged.id));

        measure_time!("commit_photo", {
            fs::create_dir_all(&self.public_dir)
                .await
                .map_err(commit_failure)?;

            if let Err(e) = fs::copy(&staged.path, &incoming).await {
                remove_incoming(&incoming).await;
                return Err(commit_failure(e));
            }
            if let Err(e) = fs::rename(&incoming, &destination).await {
                remove_incoming(&incoming).await;
                return Err(commit_failure(e));
            }
        });

        info!(
            file_name = %file_name,
            size_bytes = staged.size_bytes,
            md5 = %staged.md5,
            "Photo committed to {}",
            destination.display()
        );

        Ok(StoredFile {
            file_name: file_name.clone(),
            path: destination,
            size_bytes: staged.size_bytes,
            md5: staged.md5.clone(),
        })
    }

    async fn discard(&self, staged: &StagedPhoto) -> Result<(), IngestError> {
        match fs::remove_file(&staged.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(IngestError::StagingFailed(format!(
                "remove {}: {e}",
                staged.path.display()
            ))),
        }
    }
}
