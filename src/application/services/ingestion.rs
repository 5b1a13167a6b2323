use futures::future::try_join_all;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{DocumentExtractor, FileStorage};
use crate::application::services::chunking::TextChunker;
use crate::application::services::embedding_gateway::EmbeddingGateway;
use crate::domain::entities::{EmbeddingRecord, FileChunk, UploadedFile};
use crate::domain::repositories::FileRepository;

#[derive(Debug)]
pub enum IngestionError {
    UnsupportedFileType(String),
    StorageError(String),
    ExtractionError(String),
    EmbeddingError(String),
    PersistenceError(String),
}

impl std::fmt::Display for IngestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionError::UnsupportedFileType(mime) => {
                write!(f, "Unsupported file type: {}", mime)
            }
            IngestionError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            IngestionError::ExtractionError(msg) => write!(f, "Extraction error: {}", msg),
            IngestionError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            IngestionError::PersistenceError(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl std::error::Error for IngestionError {}

#[derive(Debug, Clone)]
pub struct IngestionRequest {
    pub session_id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Drives one upload end-to-end: stage bytes → extract text → chunk →
/// embed every chunk concurrently → persist file, embeddings and chunks
/// in one transaction. The staged copy is removed on success and failure
/// alike, and a failure at any step leaves no rows behind.
pub struct IngestionService {
    file_storage: Arc<dyn FileStorage>,
    document_extractor: Arc<dyn DocumentExtractor>,
    embedding_gateway: Arc<EmbeddingGateway>,
    file_repository: Arc<dyn FileRepository>,
    chunker: TextChunker,
}

impl IngestionService {
    pub fn new(
        file_storage: Arc<dyn FileStorage>,
        document_extractor: Arc<dyn DocumentExtractor>,
        embedding_gateway: Arc<EmbeddingGateway>,
        file_repository: Arc<dyn FileRepository>,
        chunk_size: usize,
    ) -> Self {
        Self {
            file_storage,
            document_extractor,
            embedding_gateway,
            file_repository,
            chunker: TextChunker::new(chunk_size),
        }
    }

    pub async fn ingest(&self, request: IngestionRequest) -> Result<Uuid, IngestionError> {
        if !self.document_extractor.can_extract(&request.mime_type) {
            return Err(IngestionError::UnsupportedFileType(request.mime_type));
        }

        let text = self.stage_and_extract(&request).await?;

        let chunk_texts = self.chunker.split(&text);
        tracing::info!(
            filename = %request.filename,
            chunks = chunk_texts.len(),
            "Extracted and chunked upload"
        );

        let file = UploadedFile::new(
            request.session_id,
            request.filename,
            request.bytes.len() as i64,
            request.mime_type,
        );

        let vectors = try_join_all(chunk_texts.iter().map(|chunk| async {
            self.embedding_gateway
                .embed(chunk)
                .await
                .map_err(|e| IngestionError::EmbeddingError(e.to_string()))
        }))
        .await?;

        let mut embeddings = Vec::with_capacity(chunk_texts.len());
        let mut chunks = Vec::with_capacity(chunk_texts.len());
        for (index, (content, vector)) in chunk_texts.into_iter().zip(vectors).enumerate() {
            let embedding = EmbeddingRecord::for_file_chunk(
                request.session_id,
                file.id(),
                index as i32,
                content.clone(),
                vector,
            );
            chunks.push(FileChunk::new(
                file.id(),
                index as i32,
                content,
                embedding.id(),
            ));
            embeddings.push(embedding);
        }

        self.file_repository
            .save_ingestion(&file, &chunks, &embeddings)
            .await
            .map_err(|e| IngestionError::PersistenceError(e.to_string()))
    }

    /// Stage the raw bytes, extract text, and always remove the staged
    /// copy before returning. The staging area must not accumulate
    /// files from failed ingestions.
    async fn stage_and_extract(&self, request: &IngestionRequest) -> Result<String, IngestionError> {
        let staged = self
            .file_storage
            .store_file(&request.bytes, &request.filename)
            .await
            .map_err(|e| IngestionError::StorageError(e.to_string()))?;

        let extracted = self
            .document_extractor
            .extract_text(Path::new(&staged.path), &request.mime_type)
            .await;

        if let Err(e) = self.file_storage.delete_file(staged.id).await {
            tracing::warn!(path = %staged.path, error = %e, "Failed to remove staged upload");
        }

        extracted.map_err(|e| IngestionError::ExtractionError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::document_extractor::DocumentExtractionError;
    use crate::application::ports::embedding_provider::{
        EmbeddingProvider, EmbeddingProviderError,
    };
    use crate::application::ports::file_storage::{FileStorageError, StoredFile};
    use crate::domain::repositories::file_repository::FileRepositoryError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MemoryStorage {
        stored: AtomicUsize,
        deleted: AtomicUsize,
    }

    impl MemoryStorage {
        fn new() -> Self {
            Self {
                stored: AtomicUsize::new(0),
                deleted: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FileStorage for MemoryStorage {
        async fn store_file(
            &self,
            _data: &[u8],
            file_name: &str,
        ) -> Result<StoredFile, FileStorageError> {
            self.stored.fetch_add(1, Ordering::SeqCst);
            Ok(StoredFile {
                id: Uuid::new_v4(),
                path: format!("/tmp/{}", file_name),
            })
        }

        async fn delete_file(&self, _file_id: Uuid) -> Result<bool, FileStorageError> {
            self.deleted.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    struct StaticExtractor {
        text: String,
    }

    #[async_trait]
    impl DocumentExtractor for StaticExtractor {
        async fn extract_text(
            &self,
            _file_path: &std::path::Path,
            _mime_type: &str,
        ) -> Result<String, DocumentExtractionError> {
            Ok(self.text.clone())
        }

        fn can_extract(&self, mime_type: &str) -> bool {
            mime_type == "text/plain"
        }

        fn supported_formats(&self) -> Vec<String> {
            vec!["text/plain".to_string()]
        }
    }

    struct CountingProvider {
        calls: AtomicUsize,
        fail_on_call: Option<usize>,
    }

    #[async_trait]
    impl EmbeddingProvider for CountingProvider {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if Some(call) == self.fail_on_call {
                return Err(EmbeddingProviderError::ApiError(
                    "embedding backend down".to_string(),
                ));
            }
            Ok(vec![1.0, 2.0, 3.0])
        }

        fn model_name(&self) -> &str {
            "counting-test-model"
        }
    }

    #[derive(Default)]
    struct RecordingFileRepository {
        saved: Mutex<Vec<(UploadedFile, Vec<FileChunk>, Vec<EmbeddingRecord>)>>,
    }

    #[async_trait]
    impl FileRepository for RecordingFileRepository {
        async fn save_ingestion(
            &self,
            file: &UploadedFile,
            chunks: &[FileChunk],
            embeddings: &[EmbeddingRecord],
        ) -> Result<Uuid, FileRepositoryError> {
            self.saved.lock().unwrap().push((
                file.clone(),
                chunks.to_vec(),
                embeddings.to_vec(),
            ));
            Ok(file.id())
        }

        async fn find_by_id(
            &self,
            _id: Uuid,
        ) -> Result<Option<UploadedFile>, FileRepositoryError> {
            Ok(None)
        }

        async fn find_by_session(
            &self,
            _session_id: Uuid,
        ) -> Result<Vec<UploadedFile>, FileRepositoryError> {
            Ok(Vec::new())
        }

        async fn delete(&self, _id: Uuid) -> Result<bool, FileRepositoryError> {
            Ok(false)
        }
    }

    fn service_with(
        text: &str,
        fail_on_call: Option<usize>,
        chunk_size: usize,
    ) -> (
        IngestionService,
        Arc<RecordingFileRepository>,
        Arc<MemoryStorage>,
    ) {
        let storage = Arc::new(MemoryStorage::new());
        let repository = Arc::new(RecordingFileRepository::default());
        let gateway = Arc::new(EmbeddingGateway::new(
            Arc::new(CountingProvider {
                calls: AtomicUsize::new(0),
                fail_on_call,
            }),
            4,
        ));
        let service = IngestionService::new(
            storage.clone(),
            Arc::new(StaticExtractor {
                text: text.to_string(),
            }),
            gateway,
            repository.clone(),
            chunk_size,
        );
        (service, repository, storage)
    }

    fn request() -> IngestionRequest {
        IngestionRequest {
            session_id: Uuid::new_v4(),
            filename: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
            bytes: b"irrelevant, the extractor is canned".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_successful_ingestion_persists_aligned_rows() {
        let (service, repository, storage) =
            service_with("First point. Second point. Third point.", None, 14);

        let file_id = service.ingest(request()).await.unwrap();

        let saved = repository.saved.lock().unwrap();
        let (file, chunks, embeddings) = &saved[0];
        assert_eq!(file.id(), file_id);
        assert_eq!(chunks.len(), 3);
        assert_eq!(embeddings.len(), 3);
        for (i, (chunk, embedding)) in chunks.iter().zip(embeddings.iter()).enumerate() {
            assert_eq!(chunk.chunk_index(), i as i32);
            assert_eq!(embedding.chunk_index(), i as i32);
            assert_eq!(chunk.embedding_id(), embedding.id());
            assert_eq!(chunk.content(), embedding.content());
            assert_eq!(embedding.source_id(), file.id());
            assert_eq!(embedding.dimension(), 4);
        }
        assert_eq!(storage.deleted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_2500_char_text_at_default_chunk_size_yields_three_of_each() {
        let text = format!("{}.", "a".repeat(99)).repeat(25);
        let (service, repository, _storage) = service_with(&text, None, 1000);

        service.ingest(request()).await.unwrap();

        let saved = repository.saved.lock().unwrap();
        let (_, chunks, embeddings) = &saved[0];
        assert_eq!(chunks.len(), 3);
        assert_eq!(embeddings.len(), 3);
        let indices: Vec<i32> = chunks.iter().map(|c| c.chunk_index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_embedding_failure_persists_nothing() {
        let (service, repository, storage) =
            service_with("First point. Second point. Third point.", Some(1), 14);

        let result = service.ingest(request()).await;

        assert!(matches!(result, Err(IngestionError::EmbeddingError(_))));
        assert!(repository.saved.lock().unwrap().is_empty());
        // Staged copy is still cleaned up on the failure path.
        assert_eq!(storage.deleted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsupported_mime_type_fails_before_staging() {
        let (service, repository, storage) = service_with("text", None, 1000);

        let mut req = request();
        req.mime_type = "image/png".to_string();
        let result = service.ingest(req).await;

        assert!(matches!(
            result,
            Err(IngestionError::UnsupportedFileType(_))
        ));
        assert!(repository.saved.lock().unwrap().is_empty());
        assert_eq!(storage.stored.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_content_still_creates_file_row() {
        let (service, repository, _storage) = service_with("   ", None, 1000);

        service.ingest(request()).await.unwrap();

        let saved = repository.saved.lock().unwrap();
        let (_, chunks, embeddings) = &saved[0];
        assert!(chunks.is_empty());
        assert!(embeddings.is_empty());
    }
}
