pub mod postgres_embedding_repository;
pub mod postgres_file_repository;
pub mod postgres_message_repository;
pub mod postgres_session_repository;

pub use postgres_embedding_repository::PostgresEmbeddingRepository;
pub use postgres_file_repository::PostgresFileRepository;
pub use postgres_message_repository::PostgresMessageRepository;
pub use postgres_session_repository::PostgresSessionRepository;
