use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::FileRepository;

#[derive(Debug)]
pub enum DeleteFileError {
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for DeleteFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteFileError::NotFound(id) => write!(f, "File not found: {}", id),
            DeleteFileError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteFileError {}

pub struct DeleteFileUseCase {
    file_repository: Arc<dyn FileRepository>,
}

impl DeleteFileUseCase {
    pub fn new(file_repository: Arc<dyn FileRepository>) -> Self {
        Self { file_repository }
    }

    pub async fn execute(&self, file_id: Uuid) -> Result<(), DeleteFileError> {
        let deleted = self
            .file_repository
            .delete(file_id)
            .await
            .map_err(|e| DeleteFileError::RepositoryError(e.to_string()))?;

        if !deleted {
            return Err(DeleteFileError::NotFound(file_id));
        }

        tracing::info!(%file_id, "File deleted");
        Ok(())
    }
}
