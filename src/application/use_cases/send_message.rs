use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::ChatService;
use crate::application::services::chat::ChatError;
use crate::domain::repositories::SessionRepository;

#[derive(Debug)]
pub enum SendMessageError {
    SessionNotFound(Uuid),
    ValidationError(String),
    UpstreamFailed(String),
    PersistenceFailed(String),
}

impl std::fmt::Display for SendMessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendMessageError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            SendMessageError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            SendMessageError::UpstreamFailed(msg) => write!(f, "Chat turn failed: {}", msg),
            SendMessageError::PersistenceFailed(msg) => write!(f, "Chat turn failed: {}", msg),
        }
    }
}

impl std::error::Error for SendMessageError {}

impl From<ChatError> for SendMessageError {
    fn from(error: ChatError) -> Self {
        match error {
            ChatError::PersistenceError(msg) => SendMessageError::PersistenceFailed(msg),
            other => SendMessageError::UpstreamFailed(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    pub session_id: Uuid,
    pub question: String,
    pub file_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct SendMessageResponse {
    pub message: String,
}

pub struct SendMessageUseCase {
    session_repository: Arc<dyn SessionRepository>,
    chat_service: Arc<ChatService>,
}

impl SendMessageUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        chat_service: Arc<ChatService>,
    ) -> Self {
        Self {
            session_repository,
            chat_service,
        }
    }

    pub async fn execute(&self, request: SendMessageRequest) -> Result<SendMessageResponse, SendMessageError> {
        if request.question.trim().is_empty() {
            return Err(SendMessageError::ValidationError(
                "Question cannot be empty".to_string(),
            ));
        }

        self.session_repository
            .find_by_id(request.session_id)
            .await
            .map_err(|e| SendMessageError::PersistenceFailed(e.to_string()))?
            .ok_or(SendMessageError::SessionNotFound(request.session_id))?;

        let answer = self
            .chat_service
            .handle_turn(request.session_id, &request.question, request.file_id)
            .await?;

        Ok(SendMessageResponse { message: answer })
    }
}
