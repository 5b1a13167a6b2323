use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{ChatMessage, EmbeddingRecord};
use crate::domain::repositories::MessageRepository;
use crate::domain::repositories::message_repository::{MessageRepositoryError, MessageSort};
use crate::infrastructure::database::models::{MessageModel, NewEmbeddingModel, NewMessageModel};
use crate::infrastructure::database::schema::{chat_messages, embeddings, sessions};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresMessageRepository {
    pool: DbPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn save_with_embedding(
        &self,
        message: &ChatMessage,
        embedding: &EmbeddingRecord,
    ) -> Result<(), MessageRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| MessageRepositoryError::DatabaseError(e.to_string()))?;

        let new_message = NewMessageModel::from(message);
        let new_embedding = NewEmbeddingModel::from(embedding);
        let session = message.session_id();

        // The message row, its chat embedding, and the session's
        // updated_at bump land together.
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(chat_messages::table)
                .values(&new_message)
                .execute(conn)?;

            diesel::insert_into(embeddings::table)
                .values(&new_embedding)
                .execute(conn)?;

            diesel::update(sessions::table.find(session))
                .set(sessions::updated_at.eq(Utc::now()))
                .execute(conn)?;

            Ok(())
        })
        .map_err(|e| MessageRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_recent(
        &self,
        session: Uuid,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, MessageRepositoryError> {
        self.find_by_session(session, MessageSort::Descending, limit, 0)
            .await
    }

    async fn find_by_session(
        &self,
        session: Uuid,
        sort: MessageSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChatMessage>, MessageRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| MessageRepositoryError::DatabaseError(e.to_string()))?;

        let base = chat_messages::table.filter(chat_messages::session_id.eq(session));

        let models = match sort {
            MessageSort::Ascending => base
                .order(chat_messages::created_at.asc())
                .limit(limit)
                .offset(offset)
                .load::<MessageModel>(&mut conn),
            MessageSort::Descending => base
                .order(chat_messages::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load::<MessageModel>(&mut conn),
        }
        .map_err(|e| MessageRepositoryError::DatabaseError(e.to_string()))?;

        models
            .into_iter()
            .map(|model| {
                ChatMessage::try_from(model).map_err(MessageRepositoryError::ValidationError)
            })
            .collect()
    }
}
