use async_trait::async_trait;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::EmbeddingRecord;
use crate::domain::value_objects::ContentKind;

#[derive(Debug)]
pub enum EmbeddingRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for EmbeddingRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            EmbeddingRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for EmbeddingRepositoryError {}

/// One nearest-neighbor hit. Similarity is `1 - cosine distance`.
#[derive(Debug, Clone)]
pub struct RetrievedPassage {
    pub content: String,
    pub content_kind: ContentKind,
    pub source_id: Uuid,
    pub similarity: f32,
}

#[async_trait]
pub trait EmbeddingRepository: Send + Sync {
    /// Up to `limit` rows of the session ordered by ascending cosine
    /// distance to `query`. Scoped to the session only; rows from other
    /// sessions must never appear.
    async fn search_similar(
        &self,
        session_id: Uuid,
        query: &Vector,
        limit: i64,
    ) -> Result<Vec<RetrievedPassage>, EmbeddingRepositoryError>;

    /// The most recently created rows for the session regardless of
    /// content kind, newest first. Feeds the rolling summary.
    async fn find_recent(
        &self,
        session_id: Uuid,
        limit: i64,
    ) -> Result<Vec<EmbeddingRecord>, EmbeddingRepositoryError>;
}
