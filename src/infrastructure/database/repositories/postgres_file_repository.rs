use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{EmbeddingRecord, FileChunk, UploadedFile};
use crate::domain::repositories::FileRepository;
use crate::domain::repositories::file_repository::FileRepositoryError;
use crate::domain::value_objects::ContentKind;
use crate::infrastructure::database::models::{
    FileModel, NewChunkModel, NewEmbeddingModel, NewFileModel,
};
use crate::infrastructure::database::schema::{embeddings, file_chunks, uploaded_files};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresFileRepository {
    pool: DbPool,
}

impl PostgresFileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PostgresFileRepository {
    async fn save_ingestion(
        &self,
        file: &UploadedFile,
        chunks: &[FileChunk],
        embedding_records: &[EmbeddingRecord],
    ) -> Result<Uuid, FileRepositoryError> {
        if chunks.len() != embedding_records.len() {
            return Err(FileRepositoryError::ValidationError(format!(
                "Chunk and embedding counts differ: {} vs {}",
                chunks.len(),
                embedding_records.len()
            )));
        }

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let new_file = NewFileModel::from(file);
        let new_embeddings: Vec<NewEmbeddingModel> =
            embedding_records.iter().map(NewEmbeddingModel::from).collect();
        let new_chunks: Vec<NewChunkModel> = chunks.iter().map(NewChunkModel::from).collect();

        // One transaction for the whole ingestion: the file row, its
        // embedding rows, and its chunk rows become visible together or
        // not at all.
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(uploaded_files::table)
                .values(&new_file)
                .execute(conn)?;

            if !new_embeddings.is_empty() {
                diesel::insert_into(embeddings::table)
                    .values(&new_embeddings)
                    .execute(conn)?;

                diesel::insert_into(file_chunks::table)
                    .values(&new_chunks)
                    .execute(conn)?;
            }

            Ok(())
        })
        .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        Ok(file.id())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UploadedFile>, FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let result = uploaded_files::table
            .find(id)
            .first::<FileModel>(&mut conn)
            .optional()
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(UploadedFile::from))
    }

    async fn find_by_session(
        &self,
        session: Uuid,
    ) -> Result<Vec<UploadedFile>, FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let models = uploaded_files::table
            .filter(uploaded_files::session_id.eq(session))
            .order(uploaded_files::created_at.desc())
            .load::<FileModel>(&mut conn)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(UploadedFile::from).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        // Chunks cascade from the file row; the file's embedding rows
        // are keyed by (content_type, source_id) and need an explicit
        // delete in the same transaction.
        let deleted_count = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::delete(
                    embeddings::table
                        .filter(embeddings::content_type.eq(ContentKind::File.as_str()))
                        .filter(embeddings::source_id.eq(id)),
                )
                .execute(conn)?;

                diesel::delete(uploaded_files::table.find(id)).execute(conn)
            })
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
