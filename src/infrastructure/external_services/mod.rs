pub mod document_extractors;
pub mod ollama_client;

pub use ollama_client::{OllamaClient, OllamaConfig};
