pub mod chunk_model;
pub mod embedding_model;
pub mod file_model;
pub mod message_model;
pub mod session_model;

pub use chunk_model::{ChunkModel, NewChunkModel};
pub use embedding_model::{EmbeddingModel, NewEmbeddingModel};
pub use file_model::{FileModel, NewFileModel};
pub use message_model::{MessageModel, NewMessageModel};
pub use session_model::{NewSessionModel, SessionModel};
