use crate::domain::ingest::{IngestError, PhotoStore, StoredFile, StoredFileName, UploadBody};
use std::sync::Arc;
use tracing::{info, warn};

/// Stage an uploaded photo and commit it to the public store.
pub struct IngestPhotoUseCase {
    store: Arc<dyn PhotoStore>,
}

impl IngestPhotoUseCase {
    pub fn new(store: Arc<dyn PhotoStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        original_name: Option<&str>,
        body: UploadBody<'_>,
    ) -> Result<StoredFile, IngestError> {
        let file_name: StoredFileName = original_name.unwrap_or_default().parse()?;

        let staged = self.store.stage(body).await?;
        info!(
            staging_id = %staged.id,
            size_bytes = staged.size_bytes,
            "Received upload '{}'",
            file_name
        );

        let committed = self.store.commit(&staged, &file_name).await;

        // The staged copy is removed whether or not the commit succeeded
        if let Err(e) = self.store.discard(&staged).await {
            warn!("Failed to clean up staged upload {}: {}", staged.id, e);
        }

        committed
    }
}
