pub mod chat;
pub mod chunking;
pub mod context_assembler;
pub mod embedding_gateway;
pub mod ingestion;
pub mod summarizer;

pub use chat::ChatService;
pub use chunking::TextChunker;
pub use context_assembler::ContextAssembler;
pub use embedding_gateway::EmbeddingGateway;
pub use ingestion::IngestionService;
pub use summarizer::SessionSummarizer;
