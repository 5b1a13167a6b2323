use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::EmbeddingRecord;
use crate::domain::value_objects::ContentKind;
use crate::infrastructure::database::schema::embeddings;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = embeddings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmbeddingModel {
    pub id: Uuid,
    pub session_id: Uuid,
    pub content_type: String,
    pub source_id: Uuid,
    pub chunk_index: i32,
    pub content: String,
    pub embedding: Vector,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = embeddings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewEmbeddingModel {
    pub id: Uuid,
    pub session_id: Uuid,
    pub content_type: String,
    pub source_id: Uuid,
    pub chunk_index: i32,
    pub content: String,
    pub embedding: Vector,
    pub created_at: DateTime<Utc>,
}

impl From<&EmbeddingRecord> for NewEmbeddingModel {
    fn from(record: &EmbeddingRecord) -> Self {
        Self {
            id: record.id(),
            session_id: record.session_id(),
            content_type: record.content_kind().as_str().to_string(),
            source_id: record.source_id(),
            chunk_index: record.chunk_index(),
            content: record.content().to_string(),
            embedding: record.vector().clone(),
            created_at: record.created_at(),
        }
    }
}

impl TryFrom<EmbeddingModel> for EmbeddingRecord {
    type Error = String;

    fn try_from(model: EmbeddingModel) -> Result<Self, Self::Error> {
        let kind = ContentKind::parse(&model.content_type)?;

        Ok(EmbeddingRecord::from_parts(
            model.id,
            model.session_id,
            kind,
            model.source_id,
            model.chunk_index,
            model.content,
            model.embedding,
            model.created_at,
        ))
    }
}
