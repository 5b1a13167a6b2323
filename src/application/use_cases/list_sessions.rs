use std::sync::Arc;

use crate::domain::entities::Session;
use crate::domain::repositories::SessionRepository;

#[derive(Debug)]
pub enum ListSessionsError {
    RepositoryError(String),
}

impl std::fmt::Display for ListSessionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListSessionsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListSessionsError {}

#[derive(Debug, Clone)]
pub struct ListSessionsRequest {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub struct ListSessionsUseCase {
    session_repository: Arc<dyn SessionRepository>,
}

impl ListSessionsUseCase {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    pub async fn execute(&self, request: ListSessionsRequest) -> Result<Vec<Session>, ListSessionsError> {
        self.session_repository
            .list(request.limit.unwrap_or(50), request.offset.unwrap_or(0))
            .await
            .map_err(|e| ListSessionsError::RepositoryError(e.to_string()))
    }
}
