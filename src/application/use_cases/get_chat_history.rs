use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::ChatMessage;
use crate::domain::repositories::message_repository::MessageSort;
use crate::domain::repositories::{MessageRepository, SessionRepository};

#[derive(Debug)]
pub enum GetChatHistoryError {
    SessionNotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for GetChatHistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetChatHistoryError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            GetChatHistoryError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetChatHistoryError {}

#[derive(Debug, Clone)]
pub struct GetChatHistoryRequest {
    pub session_id: Uuid,
    pub sort: MessageSort,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub struct GetChatHistoryUseCase {
    session_repository: Arc<dyn SessionRepository>,
    message_repository: Arc<dyn MessageRepository>,
}

impl GetChatHistoryUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        message_repository: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            session_repository,
            message_repository,
        }
    }

    pub async fn execute(&self, request: GetChatHistoryRequest) -> Result<Vec<ChatMessage>, GetChatHistoryError> {
        self.session_repository
            .find_by_id(request.session_id)
            .await
            .map_err(|e| GetChatHistoryError::RepositoryError(e.to_string()))?
            .ok_or(GetChatHistoryError::SessionNotFound(request.session_id))?;

        self.message_repository
            .find_by_session(
                request.session_id,
                request.sort,
                request.limit.unwrap_or(100),
                request.offset.unwrap_or(0),
            )
            .await
            .map_err(|e| GetChatHistoryError::RepositoryError(e.to_string()))
    }
}
