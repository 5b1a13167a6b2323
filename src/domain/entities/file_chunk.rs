use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bounded-size contiguous slice of a document's extracted text.
/// Chunk indices within a file are 0-based and contiguous; a file's
/// chunks are written in a single ingestion pass, each referencing the
/// embedding row produced for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileChunk {
    id: Uuid,
    file_id: Uuid,
    chunk_index: i32,
    content: String,
    embedding_id: Uuid,
    created_at: DateTime<Utc>,
}

impl FileChunk {
    pub fn new(file_id: Uuid, chunk_index: i32, content: String, embedding_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_id,
            chunk_index,
            content,
            embedding_id,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_id(&self) -> Uuid {
        self.file_id
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn embedding_id(&self) -> Uuid {
        self.embedding_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_creation() {
        let file_id = Uuid::new_v4();
        let embedding_id = Uuid::new_v4();
        let chunk = FileChunk::new(file_id, 0, "Some sentence.".to_string(), embedding_id);

        assert_eq!(chunk.file_id(), file_id);
        assert_eq!(chunk.chunk_index(), 0);
        assert_eq!(chunk.embedding_id(), embedding_id);
        assert!(!chunk.is_empty());
    }
}
