use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug)]
pub enum FileStorageError {
    FileNotFound(String),
    IoError(String),
}

impl std::fmt::Display for FileStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStorageError::FileNotFound(path) => write!(f, "File not found: {}", path),
            FileStorageError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for FileStorageError {}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: Uuid,
    pub path: String,
}

/// Staging area for uploaded bytes. Files live here only for the
/// duration of one ingestion; the pipeline deletes them on success and
/// failure alike.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn store_file(&self, data: &[u8], file_name: &str)
    -> Result<StoredFile, FileStorageError>;

    async fn delete_file(&self, file_id: Uuid) -> Result<bool, FileStorageError>;
}
