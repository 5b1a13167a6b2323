use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::MessageRole;

/// One persisted chat turn. Immutable once created; the transcript is
/// ordered by creation time. `file_id` is a context hint pointing at an
/// uploaded file, not ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: Uuid,
    session_id: Uuid,
    file_id: Option<Uuid>,
    role: MessageRole,
    content: String,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        session_id: Uuid,
        file_id: Option<Uuid>,
        role: MessageRole,
        content: String,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            file_id,
            role,
            content,
            metadata: metadata.unwrap_or_else(|| serde_json::json!({})),
            created_at: Utc::now(),
        }
    }

    pub fn from_parts(
        id: Uuid,
        session_id: Uuid,
        file_id: Option<Uuid>,
        role: MessageRole,
        content: String,
        metadata: serde_json::Value,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            file_id,
            role,
            content,
            metadata,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn file_id(&self) -> Option<Uuid> {
        self.file_id
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> &serde_json::Value {
        &self.metadata
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `"User: ..."` / `"Assistant: ..."` line for the summarizer prompt.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role.speaker_label(), self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let session_id = Uuid::new_v4();
        let message = ChatMessage::new(
            session_id,
            None,
            MessageRole::User,
            "What does the report conclude?".to_string(),
            None,
        );

        assert_eq!(message.session_id(), session_id);
        assert_eq!(message.role(), MessageRole::User);
        assert_eq!(message.file_id(), None);
        assert_eq!(message.metadata(), &serde_json::json!({}));
    }

    #[test]
    fn test_transcript_line() {
        let message = ChatMessage::new(
            Uuid::new_v4(),
            None,
            MessageRole::Assistant,
            "It recommends option B.".to_string(),
            None,
        );

        assert_eq!(
            message.transcript_line(),
            "Assistant: It recommends option B."
        );
    }
}
