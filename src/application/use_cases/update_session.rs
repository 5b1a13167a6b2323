use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Session;
use crate::domain::repositories::SessionRepository;
use crate::domain::repositories::session_repository::{SessionRepositoryError, SessionUpdate};

#[derive(Debug)]
pub enum UpdateSessionError {
    NotFound(Uuid),
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for UpdateSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateSessionError::NotFound(id) => write!(f, "Session not found: {}", id),
            UpdateSessionError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UpdateSessionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UpdateSessionError {}

#[derive(Debug, Clone)]
pub struct UpdateSessionRequest {
    pub session_id: Uuid,
    pub title: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

pub struct UpdateSessionUseCase {
    session_repository: Arc<dyn SessionRepository>,
}

impl UpdateSessionUseCase {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    pub async fn execute(&self, request: UpdateSessionRequest) -> Result<Session, UpdateSessionError> {
        let update = SessionUpdate {
            title: request.title,
            metadata: request.metadata,
        };

        if update.is_empty() {
            return Err(UpdateSessionError::ValidationError(
                "No updates provided".to_string(),
            ));
        }

        match self.session_repository.update(request.session_id, update).await {
            Ok(session) => {
                tracing::info!(session_id = %request.session_id, "Session updated");
                Ok(session)
            }
            Err(SessionRepositoryError::NotFound(id)) => Err(UpdateSessionError::NotFound(id)),
            Err(e) => Err(UpdateSessionError::RepositoryError(e.to_string())),
        }
    }
}
