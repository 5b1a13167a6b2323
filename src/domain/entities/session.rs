use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The unit of conversation scoping. A session owns its uploaded files,
/// their chunks and embeddings, and the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: Uuid,
    title: Option<String>,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(title: Option<String>, metadata: Option<serde_json::Value>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            metadata: metadata.unwrap_or_else(|| serde_json::json!({})),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_parts(
        id: Uuid,
        title: Option<String>,
        metadata: serde_json::Value,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            metadata,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn metadata(&self) -> &serde_json::Value {
        &self.metadata
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults_metadata_to_empty_object() {
        let session = Session::new(Some("research".to_string()), None);

        assert_eq!(session.title(), Some("research"));
        assert_eq!(session.metadata(), &serde_json::json!({}));
        assert_eq!(session.created_at(), session.updated_at());
    }
}
