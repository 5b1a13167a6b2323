use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::ChatMessage;
use crate::domain::value_objects::MessageRole;
use crate::infrastructure::database::schema::chat_messages;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageModel {
    pub id: Uuid,
    pub session_id: Uuid,
    pub file_id: Option<Uuid>,
    pub role: String,
    pub content: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewMessageModel {
    pub id: Uuid,
    pub session_id: Uuid,
    pub file_id: Option<Uuid>,
    pub role: String,
    pub content: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatMessage> for NewMessageModel {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id(),
            session_id: message.session_id(),
            file_id: message.file_id(),
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
            metadata: message.metadata().clone(),
            created_at: message.created_at(),
        }
    }
}

impl TryFrom<MessageModel> for ChatMessage {
    type Error = String;

    fn try_from(model: MessageModel) -> Result<Self, Self::Error> {
        let role = MessageRole::parse(&model.role)?;

        Ok(ChatMessage::from_parts(
            model.id,
            model.session_id,
            model.file_id,
            role,
            model.content,
            model.metadata,
            model.created_at,
        ))
    }
}
