use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::file_storage::{FileStorage, FileStorageError, StoredFile};

/// Disk-backed staging area for uploads. Files are keyed by a generated
/// id, keeping the original extension so format-sniffing tools still
/// work on the staged copy.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    async fn ensure_directory_exists(&self) -> Result<(), FileStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))
    }

    fn file_path(&self, file_id: Uuid, extension: Option<&str>) -> PathBuf {
        match extension {
            Some(ext) => self.base_path.join(format!("{}.{}", file_id, ext)),
            None => self.base_path.join(file_id.to_string()),
        }
    }

    async fn find_stored_path(&self, file_id: Uuid) -> Option<PathBuf> {
        let prefix = file_id.to_string();
        let mut entries = fs::read_dir(&self.base_path).await.ok()?;
        while let Ok(Some(entry)) = entries.next_entry().await {
            if entry
                .file_name()
                .to_string_lossy()
                .starts_with(&prefix)
            {
                return Some(entry.path());
            }
        }
        None
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store_file(
        &self,
        data: &[u8],
        file_name: &str,
    ) -> Result<StoredFile, FileStorageError> {
        self.ensure_directory_exists().await?;

        let file_id = Uuid::new_v4();
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str());
        let path = self.file_path(file_id, extension);

        fs::write(&path, data)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        Ok(StoredFile {
            id: file_id,
            path: path.to_string_lossy().to_string(),
        })
    }

    async fn delete_file(&self, file_id: Uuid) -> Result<bool, FileStorageError> {
        let Some(path) = self.find_stored_path(file_id).await else {
            return Ok(false);
        };

        fs::remove_file(&path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> LocalFileStorage {
        let dir = std::env::temp_dir().join(format!("staging-{}", Uuid::new_v4()));
        LocalFileStorage::new(dir)
    }

    #[tokio::test]
    async fn test_store_then_delete() {
        let storage = storage();

        let stored = storage.store_file(b"content.", "notes.txt").await.unwrap();
        assert!(stored.path.ends_with(".txt"));
        assert!(std::path::Path::new(&stored.path).exists());

        let deleted = storage.delete_file(stored.id).await.unwrap();
        assert!(deleted);
        assert!(!std::path::Path::new(&stored.path).exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_not_an_error() {
        let storage = storage();
        storage.store_file(b"x", "seed.txt").await.unwrap();

        let deleted = storage.delete_file(Uuid::new_v4()).await.unwrap();

        assert!(!deleted);
    }
}
