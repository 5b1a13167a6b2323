pub mod pdf_extractor;
pub mod text_extractor;

pub use pdf_extractor::PdfExtractor;
pub use text_extractor::TextExtractor;

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor,
};

/// Dispatches extraction on the declared MIME type. A type no extractor
/// claims fails before any chunking work begins.
pub struct CompositeDocumentExtractor {
    text_extractor: Arc<TextExtractor>,
    pdf_extractor: Arc<PdfExtractor>,
}

impl CompositeDocumentExtractor {
    pub fn new() -> Self {
        Self {
            text_extractor: Arc::new(TextExtractor::new()),
            pdf_extractor: Arc::new(PdfExtractor::new()),
        }
    }

    fn extractor_for_type(&self, mime_type: &str) -> Option<Arc<dyn DocumentExtractor>> {
        if self.text_extractor.can_extract(mime_type) {
            Some(self.text_extractor.clone())
        } else if self.pdf_extractor.can_extract(mime_type) {
            Some(self.pdf_extractor.clone())
        } else {
            None
        }
    }
}

impl Default for CompositeDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for CompositeDocumentExtractor {
    async fn extract_text(
        &self,
        file_path: &Path,
        mime_type: &str,
    ) -> Result<String, DocumentExtractionError> {
        let extractor = self
            .extractor_for_type(mime_type)
            .ok_or_else(|| DocumentExtractionError::UnsupportedFormat(mime_type.to_string()))?;

        extractor.extract_text(file_path, mime_type).await
    }

    fn can_extract(&self, mime_type: &str) -> bool {
        self.text_extractor.can_extract(mime_type) || self.pdf_extractor.can_extract(mime_type)
    }

    fn supported_formats(&self) -> Vec<String> {
        let mut formats = Vec::new();
        formats.extend(self.text_extractor.supported_formats());
        formats.extend(self.pdf_extractor.supported_formats());
        formats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_covers_the_capability_set() {
        let extractor = CompositeDocumentExtractor::new();

        assert!(extractor.can_extract("text/plain"));
        assert!(extractor.can_extract("text/csv"));
        assert!(extractor.can_extract("application/pdf"));
        assert!(!extractor.can_extract("text/html"));
        assert!(!extractor.can_extract("image/png"));
    }

    #[tokio::test]
    async fn test_unknown_type_is_rejected() {
        let extractor = CompositeDocumentExtractor::new();

        let result = extractor
            .extract_text(Path::new("/tmp/whatever"), "application/zip")
            .await;

        assert!(matches!(
            result,
            Err(DocumentExtractionError::UnsupportedFormat(_))
        ));
    }
}
