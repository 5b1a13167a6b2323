use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor,
};

/// Plain text and CSV: the bytes are the text, decoded as UTF-8 with
/// invalid sequences replaced.
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for TextExtractor {
    async fn extract_text(
        &self,
        file_path: &Path,
        _mime_type: &str,
    ) -> Result<String, DocumentExtractionError> {
        let bytes = fs::read(file_path)
            .await
            .map_err(|e| DocumentExtractionError::IoError(e.to_string()))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn can_extract(&self, mime_type: &str) -> bool {
        matches!(mime_type.to_lowercase().as_str(), "text/plain" | "text/csv")
    }

    fn supported_formats(&self) -> Vec<String> {
        vec!["text/plain".to_string(), "text/csv".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_supported_mime_types() {
        let extractor = TextExtractor::new();

        assert!(extractor.can_extract("text/plain"));
        assert!(extractor.can_extract("text/csv"));
        assert!(extractor.can_extract("TEXT/PLAIN"));
        assert!(!extractor.can_extract("application/pdf"));
    }

    #[tokio::test]
    async fn test_reads_bytes_verbatim() {
        let path = std::env::temp_dir().join(format!("extract-{}.txt", Uuid::new_v4()));
        tokio::fs::write(&path, b"line one.\nline two.").await.unwrap();

        let extractor = TextExtractor::new();
        let text = extractor.extract_text(&path, "text/plain").await.unwrap();

        assert_eq!(text, "line one.\nline two.");
        tokio::fs::remove_file(&path).await.unwrap();
    }
}
