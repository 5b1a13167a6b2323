use std::{path::PathBuf, sync::Arc};

use crate::{
    application::{
        ports::{ChatModel, DocumentExtractor, EmbeddingProvider, FileStorage},
        services::{
            ChatService, ContextAssembler, EmbeddingGateway, IngestionService, SessionSummarizer,
        },
        use_cases::{
            CreateSessionUseCase, DeleteFileUseCase, DeleteSessionUseCase, GetChatHistoryUseCase,
            GetSessionUseCase, ListFilesUseCase, ListSessionsUseCase, SendMessageUseCase,
            UpdateSessionUseCase, UploadFileUseCase,
        },
    },
    domain::repositories::{
        EmbeddingRepository, FileRepository, MessageRepository, SessionRepository,
    },
    infrastructure::{
        database::{
            create_connection_pool, get_database_connection,
            repositories::{
                PostgresEmbeddingRepository, PostgresFileRepository, PostgresMessageRepository,
                PostgresSessionRepository,
            },
            run_migrations,
        },
        external_services::{OllamaClient, document_extractors::CompositeDocumentExtractor},
        file_system::LocalFileStorage,
    },
    presentation::http::handlers::{ChatHandler, FileHandler, SessionHandler},
};

const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;
const DEFAULT_CHUNK_SIZE: usize = 1000;
const RETRIEVAL_LIMIT: i64 = 5;
const SUMMARY_MESSAGE_WINDOW: i64 = 6;
const SUMMARY_PASSAGE_WINDOW: i64 = 40;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Builds the whole object graph once at startup. Shared collaborators
/// (pool, Ollama client) are constructed here and passed by reference
/// into every component; nothing reaches for a global.
pub struct AppContainer {
    // Repositories
    pub session_repository: Arc<dyn SessionRepository>,
    pub file_repository: Arc<dyn FileRepository>,
    pub embedding_repository: Arc<dyn EmbeddingRepository>,
    pub message_repository: Arc<dyn MessageRepository>,

    // External services
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub chat_model: Arc<dyn ChatModel>,
    pub file_storage: Arc<dyn FileStorage>,
    pub document_extractor: Arc<dyn DocumentExtractor>,

    // Application services
    pub embedding_gateway: Arc<EmbeddingGateway>,
    pub ingestion_service: Arc<IngestionService>,
    pub summarizer: Arc<SessionSummarizer>,
    pub context_assembler: Arc<ContextAssembler>,
    pub chat_service: Arc<ChatService>,

    // Use cases
    pub create_session_use_case: Arc<CreateSessionUseCase>,
    pub get_session_use_case: Arc<GetSessionUseCase>,
    pub update_session_use_case: Arc<UpdateSessionUseCase>,
    pub delete_session_use_case: Arc<DeleteSessionUseCase>,
    pub list_sessions_use_case: Arc<ListSessionsUseCase>,
    pub upload_file_use_case: Arc<UploadFileUseCase>,
    pub list_files_use_case: Arc<ListFilesUseCase>,
    pub delete_file_use_case: Arc<DeleteFileUseCase>,
    pub send_message_use_case: Arc<SendMessageUseCase>,
    pub get_chat_history_use_case: Arc<GetChatHistoryUseCase>,

    // HTTP handlers
    pub session_handler: Arc<SessionHandler>,
    pub file_handler: Arc<FileHandler>,
    pub chat_handler: Arc<ChatHandler>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool()?;
        let mut conn = get_database_connection()
            .map_err(|e| format!("Failed to create database connection: {}", e))?;
        run_migrations(&mut conn)
            .map_err(|e| format!("Failed to run database migrations: {}", e))?;

        // Repositories
        let session_repository: Arc<dyn SessionRepository> =
            Arc::new(PostgresSessionRepository::new(db_pool.clone()));
        let file_repository: Arc<dyn FileRepository> =
            Arc::new(PostgresFileRepository::new(db_pool.clone()));
        let embedding_repository: Arc<dyn EmbeddingRepository> =
            Arc::new(PostgresEmbeddingRepository::new(db_pool.clone()));
        let message_repository: Arc<dyn MessageRepository> =
            Arc::new(PostgresMessageRepository::new(db_pool));

        // External services: one Ollama client serves both capabilities.
        let ollama = Arc::new(
            OllamaClient::from_env()
                .map_err(|e| format!("Failed to create Ollama client: {}", e))?,
        );
        let embedding_provider: Arc<dyn EmbeddingProvider> = ollama.clone();
        let chat_model: Arc<dyn ChatModel> = ollama;

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()));
        let file_storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(upload_dir));

        let document_extractor: Arc<dyn DocumentExtractor> =
            Arc::new(CompositeDocumentExtractor::new());

        // Application services
        let embedding_gateway = Arc::new(EmbeddingGateway::new(
            embedding_provider.clone(),
            env_or("EMBEDDING_DIMENSION", DEFAULT_EMBEDDING_DIMENSION),
        ));
        let ingestion_service = Arc::new(IngestionService::new(
            file_storage.clone(),
            document_extractor.clone(),
            embedding_gateway.clone(),
            file_repository.clone(),
            env_or("CHUNK_SIZE", DEFAULT_CHUNK_SIZE),
        ));
        let summarizer = Arc::new(SessionSummarizer::new(
            message_repository.clone(),
            embedding_repository.clone(),
            chat_model.clone(),
            SUMMARY_MESSAGE_WINDOW,
            SUMMARY_PASSAGE_WINDOW,
        ));
        let context_assembler = Arc::new(ContextAssembler::new(
            embedding_gateway.clone(),
            embedding_repository.clone(),
            summarizer.clone(),
            RETRIEVAL_LIMIT,
        ));
        let chat_service = Arc::new(ChatService::new(
            context_assembler.clone(),
            chat_model.clone(),
            embedding_gateway.clone(),
            message_repository.clone(),
            Vec::new(), // no tools granted
        ));

        // Use cases
        let create_session_use_case =
            Arc::new(CreateSessionUseCase::new(session_repository.clone()));
        let get_session_use_case = Arc::new(GetSessionUseCase::new(session_repository.clone()));
        let update_session_use_case =
            Arc::new(UpdateSessionUseCase::new(session_repository.clone()));
        let delete_session_use_case =
            Arc::new(DeleteSessionUseCase::new(session_repository.clone()));
        let list_sessions_use_case =
            Arc::new(ListSessionsUseCase::new(session_repository.clone()));
        let upload_file_use_case = Arc::new(UploadFileUseCase::new(
            session_repository.clone(),
            ingestion_service.clone(),
        ));
        let list_files_use_case = Arc::new(ListFilesUseCase::new(
            session_repository.clone(),
            file_repository.clone(),
        ));
        let delete_file_use_case = Arc::new(DeleteFileUseCase::new(file_repository.clone()));
        let send_message_use_case = Arc::new(SendMessageUseCase::new(
            session_repository.clone(),
            chat_service.clone(),
        ));
        let get_chat_history_use_case = Arc::new(GetChatHistoryUseCase::new(
            session_repository.clone(),
            message_repository.clone(),
        ));

        // HTTP handlers
        let session_handler = Arc::new(SessionHandler::new(
            create_session_use_case.clone(),
            get_session_use_case.clone(),
            update_session_use_case.clone(),
            delete_session_use_case.clone(),
            list_sessions_use_case.clone(),
        ));
        let file_handler = Arc::new(FileHandler::new(
            upload_file_use_case.clone(),
            list_files_use_case.clone(),
            delete_file_use_case.clone(),
        ));
        let chat_handler = Arc::new(ChatHandler::new(
            send_message_use_case.clone(),
            get_chat_history_use_case.clone(),
        ));

        Ok(Self {
            session_repository,
            file_repository,
            embedding_repository,
            message_repository,
            embedding_provider,
            chat_model,
            file_storage,
            document_extractor,
            embedding_gateway,
            ingestion_service,
            summarizer,
            context_assembler,
            chat_service,
            create_session_use_case,
            get_session_use_case,
            update_session_use_case,
            delete_session_use_case,
            list_sessions_use_case,
            upload_file_use_case,
            list_files_use_case,
            delete_file_use_case,
            send_message_use_case,
            get_chat_history_use_case,
            session_handler,
            file_handler,
            chat_handler,
        })
    }
}
