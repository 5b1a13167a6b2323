use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{ChatMessage, EmbeddingRecord};

#[derive(Debug)]
pub enum MessageRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for MessageRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            MessageRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for MessageRepositoryError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSort {
    Ascending,
    Descending,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist one chat turn in a single transaction: insert the message
    /// row, insert its `"chat"` embedding row, and bump the owning
    /// session's `updated_at`.
    async fn save_with_embedding(
        &self,
        message: &ChatMessage,
        embedding: &EmbeddingRecord,
    ) -> Result<(), MessageRepositoryError>;

    /// The most recent messages for a session, newest first.
    async fn find_recent(
        &self,
        session_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, MessageRepositoryError>;

    async fn find_by_session(
        &self,
        session_id: Uuid,
        sort: MessageSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChatMessage>, MessageRepositoryError>;
}
