//! # PDF Extractor
//!
//! Implements the `TextExtractor` trait with the `pdf_extract` crate.

use crate::domain::traits::TextExtractor;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, String> {
        pdf_extract::extract_text_by_pages(path).map_err(|e| e.to_string())
    }
}
