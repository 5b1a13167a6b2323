use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{EmbeddingRecord, FileChunk, UploadedFile};

#[derive(Debug)]
pub enum FileRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for FileRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileRepositoryError::NotFound(id) => write!(f, "File not found: {}", id),
            FileRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            FileRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for FileRepositoryError {}

#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Persist one complete ingestion in a single transaction: the file
    /// row, one embedding row per chunk, and one chunk row per chunk
    /// referencing its embedding. Either every row exists afterwards or
    /// none does. `chunks` and `embeddings` are index-aligned; both may
    /// be empty (a valid empty-content upload).
    async fn save_ingestion(
        &self,
        file: &UploadedFile,
        chunks: &[FileChunk],
        embeddings: &[EmbeddingRecord],
    ) -> Result<Uuid, FileRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UploadedFile>, FileRepositoryError>;

    async fn find_by_session(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<UploadedFile>, FileRepositoryError>;

    /// Delete the file row, its chunks, and its embedding rows in one
    /// transaction. Returns false if no such file existed.
    async fn delete(&self, id: Uuid) -> Result<bool, FileRepositoryError>;
}
