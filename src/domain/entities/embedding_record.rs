use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ContentKind;

/// One stored vector, scoped to a session. `content` is a denormalized
/// copy of the embedded text so the summarizer can read passages without
/// joining back to chunks or messages. The vector always has the
/// configured dimension; normalization happens before construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    id: Uuid,
    session_id: Uuid,
    content_kind: ContentKind,
    source_id: Uuid,
    chunk_index: i32,
    content: String,
    vector: Vector,
    created_at: DateTime<Utc>,
}

impl EmbeddingRecord {
    /// Row for one document chunk; `source_id` is the owning file.
    pub fn for_file_chunk(
        session_id: Uuid,
        file_id: Uuid,
        chunk_index: i32,
        content: String,
        vector: Vector,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            content_kind: ContentKind::File,
            source_id: file_id,
            chunk_index,
            content,
            vector,
            created_at: Utc::now(),
        }
    }

    /// Row for one persisted chat turn; non-chunked content uses ordinal 0.
    pub fn for_chat_message(
        session_id: Uuid,
        message_id: Uuid,
        content: String,
        vector: Vector,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            content_kind: ContentKind::Chat,
            source_id: message_id,
            chunk_index: 0,
            content,
            vector,
            created_at: Utc::now(),
        }
    }

    pub fn from_parts(
        id: Uuid,
        session_id: Uuid,
        content_kind: ContentKind,
        source_id: Uuid,
        chunk_index: i32,
        content: String,
        vector: Vector,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            content_kind,
            source_id,
            chunk_index,
            content,
            vector,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn content_kind(&self) -> ContentKind {
        self.content_kind
    }

    pub fn source_id(&self) -> Uuid {
        self.source_id
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn vector(&self) -> &Vector {
        &self.vector
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn dimension(&self) -> usize {
        self.vector.as_slice().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_chunk_record() {
        let session_id = Uuid::new_v4();
        let file_id = Uuid::new_v4();
        let record = EmbeddingRecord::for_file_chunk(
            session_id,
            file_id,
            2,
            "chunk text".to_string(),
            Vector::from(vec![0.1, 0.2, 0.3]),
        );

        assert_eq!(record.content_kind(), ContentKind::File);
        assert_eq!(record.source_id(), file_id);
        assert_eq!(record.chunk_index(), 2);
        assert_eq!(record.dimension(), 3);
    }

    #[test]
    fn test_chat_record_uses_ordinal_zero() {
        let record = EmbeddingRecord::for_chat_message(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "hello".to_string(),
            Vector::from(vec![0.0; 4]),
        );

        assert_eq!(record.content_kind(), ContentKind::Chat);
        assert_eq!(record.chunk_index(), 0);
    }
}
