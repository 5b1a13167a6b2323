use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Session;
use crate::infrastructure::database::schema::sessions;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SessionModel {
    pub id: Uuid,
    pub title: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSessionModel {
    pub id: Uuid,
    pub title: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Session> for NewSessionModel {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id(),
            title: session.title().map(|t| t.to_string()),
            metadata: session.metadata().clone(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session::from_parts(
            model.id,
            model.title,
            model.metadata,
            model.created_at,
            model.updated_at,
        )
    }
}
