use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ChatMessage;
use crate::domain::value_objects::MessageRole;

#[derive(Debug, Deserialize)]
pub struct ChatRequestDto {
    pub question: String,
    pub file_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseDto {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatHistoryQueryDto {
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessageDto {
    pub id: Uuid,
    pub session_id: Uuid,
    pub file_id: Option<Uuid>,
    pub role: MessageRole,
    pub content: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id(),
            session_id: message.session_id(),
            file_id: message.file_id(),
            role: message.role(),
            content: message.content().to_string(),
            metadata: message.metadata().clone(),
            created_at: message.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponseDto {
    pub messages: Vec<ChatMessageDto>,
    pub total: usize,
}
