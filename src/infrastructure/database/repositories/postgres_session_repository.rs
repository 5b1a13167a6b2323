use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Session;
use crate::domain::repositories::SessionRepository;
use crate::domain::repositories::session_repository::{SessionRepositoryError, SessionUpdate};
use crate::infrastructure::database::models::{NewSessionModel, SessionModel};
use crate::infrastructure::database::schema::sessions::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresSessionRepository {
    pool: DbPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> Result<Session, SessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?;

        let new_session = NewSessionModel::from(session);

        let model: SessionModel = diesel::insert_into(sessions)
            .values(&new_session)
            .get_result(&mut conn)
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(Session::from(model))
    }

    async fn find_by_id(
        &self,
        session_id: Uuid,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?;

        let result = sessions
            .find(session_id)
            .first::<SessionModel>(&mut conn)
            .optional()
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Session::from))
    }

    async fn update(
        &self,
        session_id: Uuid,
        update: SessionUpdate,
    ) -> Result<Session, SessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?;

        let current = sessions
            .find(session_id)
            .first::<SessionModel>(&mut conn)
            .optional()
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(SessionRepositoryError::NotFound(session_id))?;

        let new_title = update.title.or(current.title);
        let new_metadata = update.metadata.unwrap_or(current.metadata);

        let model: SessionModel = diesel::update(sessions.find(session_id))
            .set((
                title.eq(new_title),
                metadata.eq(new_metadata),
                updated_at.eq(Utc::now()),
            ))
            .get_result(&mut conn)
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(Session::from(model))
    }

    async fn delete(&self, session_id: Uuid) -> Result<bool, SessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(sessions.find(session_id))
            .execute(&mut conn)
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Session>, SessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?;

        let models = sessions
            .order(updated_at.desc())
            .limit(limit)
            .offset(offset)
            .load::<SessionModel>(&mut conn)
            .map_err(|e| SessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Session::from).collect())
    }
}
