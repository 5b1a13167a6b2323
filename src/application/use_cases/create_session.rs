use std::sync::Arc;

use crate::domain::entities::Session;
use crate::domain::repositories::SessionRepository;
use crate::domain::repositories::session_repository::SessionRepositoryError;

#[derive(Debug)]
pub enum CreateSessionError {
    RepositoryError(String),
}

impl std::fmt::Display for CreateSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateSessionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CreateSessionError {}

impl From<SessionRepositoryError> for CreateSessionError {
    fn from(error: SessionRepositoryError) -> Self {
        CreateSessionError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateSessionRequest {
    pub title: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

pub struct CreateSessionUseCase {
    session_repository: Arc<dyn SessionRepository>,
}

impl CreateSessionUseCase {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    pub async fn execute(&self, request: CreateSessionRequest) -> Result<Session, CreateSessionError> {
        let session = Session::new(request.title, request.metadata);
        let saved = self.session_repository.save(&session).await?;
        tracing::info!(session_id = %saved.id(), "Session created");
        Ok(saved)
    }
}
