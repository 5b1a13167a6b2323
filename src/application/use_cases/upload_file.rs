use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::IngestionService;
use crate::application::services::ingestion::{IngestionError, IngestionRequest};
use crate::domain::repositories::SessionRepository;

#[derive(Debug)]
pub enum UploadFileError {
    SessionNotFound(Uuid),
    ValidationError(String),
    UnsupportedFileType(String),
    UpstreamFailed(String),
    PersistenceFailed(String),
}

impl std::fmt::Display for UploadFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadFileError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            UploadFileError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UploadFileError::UnsupportedFileType(mime) => {
                write!(f, "Unsupported file type: {}", mime)
            }
            UploadFileError::UpstreamFailed(msg) => write!(f, "Ingestion failed: {}", msg),
            UploadFileError::PersistenceFailed(msg) => write!(f, "Ingestion failed: {}", msg),
        }
    }
}

impl std::error::Error for UploadFileError {}

#[derive(Debug, Clone)]
pub struct UploadFileRequest {
    pub session_id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadFileResponse {
    pub file_id: Uuid,
    pub filename: String,
    pub file_size: i64,
    pub mime_type: String,
}

pub struct UploadFileUseCase {
    session_repository: Arc<dyn SessionRepository>,
    ingestion_service: Arc<IngestionService>,
}

impl UploadFileUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        ingestion_service: Arc<IngestionService>,
    ) -> Self {
        Self {
            session_repository,
            ingestion_service,
        }
    }

    pub async fn execute(&self, request: UploadFileRequest) -> Result<UploadFileResponse, UploadFileError> {
        if request.filename.trim().is_empty() {
            return Err(UploadFileError::ValidationError(
                "File name cannot be empty".to_string(),
            ));
        }
        if request.bytes.is_empty() {
            return Err(UploadFileError::ValidationError(
                "File data cannot be empty".to_string(),
            ));
        }

        self.session_repository
            .find_by_id(request.session_id)
            .await
            .map_err(|e| UploadFileError::PersistenceFailed(e.to_string()))?
            .ok_or(UploadFileError::SessionNotFound(request.session_id))?;

        let file_size = request.bytes.len() as i64;
        let filename = request.filename.clone();
        let mime_type = request.mime_type.clone();

        let file_id = self
            .ingestion_service
            .ingest(IngestionRequest {
                session_id: request.session_id,
                filename: request.filename,
                mime_type: request.mime_type,
                bytes: request.bytes,
            })
            .await
            .map_err(|e| match e {
                IngestionError::UnsupportedFileType(mime) => {
                    UploadFileError::UnsupportedFileType(mime)
                }
                IngestionError::PersistenceError(msg) => UploadFileError::PersistenceFailed(msg),
                other => UploadFileError::UpstreamFailed(other.to_string()),
            })?;

        tracing::info!(%file_id, %filename, "File ingested");

        Ok(UploadFileResponse {
            file_id,
            filename,
            file_size,
            mime_type,
        })
    }
}
