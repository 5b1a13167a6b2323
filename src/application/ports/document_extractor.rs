use async_trait::async_trait;
use std::path::Path;

#[derive(Debug)]
pub enum DocumentExtractionError {
    UnsupportedFormat(String),
    CorruptedFile(String),
    ExtractionFailed(String),
    IoError(String),
}

impl std::fmt::Display for DocumentExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentExtractionError::UnsupportedFormat(format) => {
                write!(f, "Unsupported format: {}", format)
            }
            DocumentExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            DocumentExtractionError::ExtractionFailed(msg) => {
                write!(f, "Extraction failed: {}", msg)
            }
            DocumentExtractionError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentExtractionError {}

/// Turns a staged file's bytes into plain text, dispatching on the
/// declared MIME type.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_text(
        &self,
        file_path: &Path,
        mime_type: &str,
    ) -> Result<String, DocumentExtractionError>;

    fn can_extract(&self, mime_type: &str) -> bool;

    fn supported_formats(&self) -> Vec<String>;
}
