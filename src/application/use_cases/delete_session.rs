use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::SessionRepository;

#[derive(Debug)]
pub enum DeleteSessionError {
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for DeleteSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteSessionError::NotFound(id) => write!(f, "Session not found: {}", id),
            DeleteSessionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteSessionError {}

pub struct DeleteSessionUseCase {
    session_repository: Arc<dyn SessionRepository>,
}

impl DeleteSessionUseCase {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    pub async fn execute(&self, session_id: Uuid) -> Result<(), DeleteSessionError> {
        let deleted = self
            .session_repository
            .delete(session_id)
            .await
            .map_err(|e| DeleteSessionError::RepositoryError(e.to_string()))?;

        if !deleted {
            return Err(DeleteSessionError::NotFound(session_id));
        }

        tracing::info!(%session_id, "Session deleted");
        Ok(())
    }
}
