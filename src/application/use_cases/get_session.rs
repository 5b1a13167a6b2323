use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Session;
use crate::domain::repositories::SessionRepository;

#[derive(Debug)]
pub enum GetSessionError {
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for GetSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetSessionError::NotFound(id) => write!(f, "Session not found: {}", id),
            GetSessionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetSessionError {}

pub struct GetSessionUseCase {
    session_repository: Arc<dyn SessionRepository>,
}

impl GetSessionUseCase {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    pub async fn execute(&self, session_id: Uuid) -> Result<Session, GetSessionError> {
        self.session_repository
            .find_by_id(session_id)
            .await
            .map_err(|e| GetSessionError::RepositoryError(e.to_string()))?
            .ok_or(GetSessionError::NotFound(session_id))
    }
}
