use async_trait::async_trait;
use lopdf::{Document, Object};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::path::Path;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor,
};

pub struct PdfExtractor {
    password: String,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            password: String::new(),
        }
    }

    fn filter_func(object_id: (u32, u16), object: &mut Object) -> Option<((u32, u16), Object)> {
        static IGNORE: &[&[u8]] = &[
            b"Length",
            b"BBox",
            b"Matrix",
            b"Filter",
            b"ColorSpace",
            b"Width",
            b"Height",
            b"BitsPerComponent",
            b"FontDescriptor",
            b"ExtGState",
            b"MediaBox",
        ];

        if let Object::Dictionary(dict) = object {
            let keys_to_remove: Vec<_> = dict
                .iter()
                .filter_map(|(key, _)| {
                    if IGNORE.contains(&key.as_slice()) {
                        Some(key.clone())
                    } else {
                        None
                    }
                })
                .collect();
            for key in keys_to_remove {
                dict.remove(&key);
            }
        }

        Some((object_id, object.to_owned()))
    }

    /// Page text in page order. A failed page fails the whole document;
    /// a partially extracted document must not reach chunking.
    fn extract_pages(doc: &Document) -> Result<String, DocumentExtractionError> {
        let pages = doc.get_pages();

        let mut extracted: Vec<Result<(u32, String), String>> = pages
            .into_par_iter()
            .map(|(page_num, _)| {
                doc.extract_text(&[page_num])
                    .map(|text| (page_num, text))
                    .map_err(|e| format!("Failed to extract text from page {}: {}", page_num, e))
            })
            .collect();

        extracted.sort_by_key(|r| match r {
            Ok((page_num, _)) => *page_num,
            Err(_) => u32::MAX,
        });

        let mut page_texts = Vec::with_capacity(extracted.len());
        for result in extracted {
            let (_, text) = result.map_err(DocumentExtractionError::ExtractionFailed)?;
            page_texts.push(text);
        }

        Ok(page_texts.join("\n"))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_text(
        &self,
        file_path: &Path,
        _mime_type: &str,
    ) -> Result<String, DocumentExtractionError> {
        let mut doc = Document::load_filtered(file_path, Self::filter_func)
            .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            doc.decrypt(&self.password).map_err(|_| {
                DocumentExtractionError::ExtractionFailed(
                    "Failed to decrypt PDF - invalid password".to_string(),
                )
            })?;
        }

        Self::extract_pages(&doc)
    }

    fn can_extract(&self, mime_type: &str) -> bool {
        mime_type.to_lowercase() == "application/pdf"
    }

    fn supported_formats(&self) -> Vec<String> {
        vec!["application/pdf".to_string()]
    }
}
