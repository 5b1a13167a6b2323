use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Session;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequestDto {
    pub title: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequestDto {
    pub title: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponseDto {
    pub id: Uuid,
    pub title: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Session> for SessionResponseDto {
    fn from(session: Session) -> Self {
        Self {
            id: session.id(),
            title: session.title().map(|t| t.to_string()),
            metadata: session.metadata().clone(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionListResponseDto {
    pub sessions: Vec<SessionResponseDto>,
    pub total: usize,
}
