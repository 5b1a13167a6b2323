pub mod embedding_repository;
pub mod file_repository;
pub mod message_repository;
pub mod session_repository;

pub use embedding_repository::EmbeddingRepository;
pub use file_repository::FileRepository;
pub use message_repository::MessageRepository;
pub use session_repository::SessionRepository;
