use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::UploadedFile;
use crate::domain::repositories::{FileRepository, SessionRepository};

#[derive(Debug)]
pub enum ListFilesError {
    SessionNotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for ListFilesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFilesError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            ListFilesError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListFilesError {}

pub struct ListFilesUseCase {
    session_repository: Arc<dyn SessionRepository>,
    file_repository: Arc<dyn FileRepository>,
}

impl ListFilesUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        file_repository: Arc<dyn FileRepository>,
    ) -> Self {
        Self {
            session_repository,
            file_repository,
        }
    }

    pub async fn execute(&self, session_id: Uuid) -> Result<Vec<UploadedFile>, ListFilesError> {
        self.session_repository
            .find_by_id(session_id)
            .await
            .map_err(|e| ListFilesError::RepositoryError(e.to_string()))?
            .ok_or(ListFilesError::SessionNotFound(session_id))?;

        self.file_repository
            .find_by_session(session_id)
            .await
            .map_err(|e| ListFilesError::RepositoryError(e.to_string()))
    }
}
