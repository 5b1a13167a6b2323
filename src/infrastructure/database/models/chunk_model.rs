use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::FileChunk;
use crate::infrastructure::database::schema::file_chunks;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable, Associations)]
#[diesel(belongs_to(super::FileModel, foreign_key = file_id))]
#[diesel(table_name = file_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChunkModel {
    pub id: Uuid,
    pub file_id: Uuid,
    pub chunk_index: i32,
    pub content: String,
    pub embedding_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = file_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChunkModel {
    pub id: Uuid,
    pub file_id: Uuid,
    pub chunk_index: i32,
    pub content: String,
    pub embedding_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&FileChunk> for NewChunkModel {
    fn from(chunk: &FileChunk) -> Self {
        Self {
            id: chunk.id(),
            file_id: chunk.file_id(),
            chunk_index: chunk.chunk_index(),
            content: chunk.content().to_string(),
            embedding_id: chunk.embedding_id(),
            created_at: chunk.created_at(),
        }
    }
}
