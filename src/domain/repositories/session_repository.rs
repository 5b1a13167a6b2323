use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Session;

#[derive(Debug)]
pub enum SessionRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for SessionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionRepositoryError::NotFound(id) => write!(f, "Session not found: {}", id),
            SessionRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            SessionRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for SessionRepositoryError {}

/// Fields a session update may change; `updated_at` is always bumped.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub title: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl SessionUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.metadata.is_none()
    }
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save(&self, session: &Session) -> Result<Session, SessionRepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, SessionRepositoryError>;
    async fn update(
        &self,
        id: Uuid,
        update: SessionUpdate,
    ) -> Result<Session, SessionRepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, SessionRepositoryError>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Session>, SessionRepositoryError>;
}
