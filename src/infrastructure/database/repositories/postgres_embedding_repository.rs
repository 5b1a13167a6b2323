use async_trait::async_trait;
use diesel::prelude::*;
use pgvector::{Vector, VectorExpressionMethods};
use uuid::Uuid;

use crate::domain::entities::EmbeddingRecord;
use crate::domain::repositories::EmbeddingRepository;
use crate::domain::repositories::embedding_repository::{
    EmbeddingRepositoryError, RetrievedPassage,
};
use crate::domain::value_objects::ContentKind;
use crate::infrastructure::database::models::EmbeddingModel;
use crate::infrastructure::database::schema::embeddings::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresEmbeddingRepository {
    pool: DbPool,
}

impl PostgresEmbeddingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmbeddingRepository for PostgresEmbeddingRepository {
    async fn search_similar(
        &self,
        session: Uuid,
        query: &Vector,
        limit: i64,
    ) -> Result<Vec<RetrievedPassage>, EmbeddingRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| EmbeddingRepositoryError::DatabaseError(e.to_string()))?;

        // pgvector's cosine distance operator orders the session's rows;
        // the session filter is what prevents cross-session leakage.
        let rows = embeddings
            .filter(session_id.eq(session))
            .select((
                content,
                content_type,
                source_id,
                embedding.cosine_distance(query.clone()),
            ))
            .order(embedding.cosine_distance(query.clone()))
            .limit(limit)
            .load::<(String, String, Uuid, f64)>(&mut conn)
            .map_err(|e| EmbeddingRepositoryError::DatabaseError(e.to_string()))?;

        let mut passages = Vec::with_capacity(rows.len());
        for (text, kind, source, distance) in rows {
            let kind = ContentKind::parse(&kind)
                .map_err(EmbeddingRepositoryError::ValidationError)?;
            passages.push(RetrievedPassage {
                content: text,
                content_kind: kind,
                source_id: source,
                similarity: (1.0 - distance) as f32,
            });
        }

        Ok(passages)
    }

    async fn find_recent(
        &self,
        session: Uuid,
        limit: i64,
    ) -> Result<Vec<EmbeddingRecord>, EmbeddingRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| EmbeddingRepositoryError::DatabaseError(e.to_string()))?;

        let models = embeddings
            .filter(session_id.eq(session))
            .order(created_at.desc())
            .limit(limit)
            .load::<EmbeddingModel>(&mut conn)
            .map_err(|e| EmbeddingRepositoryError::DatabaseError(e.to_string()))?;

        models
            .into_iter()
            .map(|model| {
                EmbeddingRecord::try_from(model)
                    .map_err(EmbeddingRepositoryError::ValidationError)
            })
            .collect()
    }
}
