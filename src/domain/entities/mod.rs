pub mod chat_message;
pub mod embedding_record;
pub mod file_chunk;
pub mod session;
pub mod uploaded_file;

pub use chat_message::ChatMessage;
pub use embedding_record::EmbeddingRecord;
pub use file_chunk::FileChunk;
pub use session::Session;
pub use uploaded_file::UploadedFile;
