//! Pipeline orchestrator: image bytes → preprocess → OCR → extract.
//!
//! Collaborator failures never propagate. A photo that cannot be decoded
//! or an OCR engine that errors out both collapse to "no text to
//! extract": the caller receives a structurally complete, entirely-absent
//! record rather than an error.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use resit_core::{ExtractionResult, ExtractorConfig};

use crate::extract::Extractor;
use crate::preprocess;
use crate::recognizer::OcrBackend;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The outcome of scanning one receipt image.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Raw OCR output, empty when a collaborator failed.
    pub ocr_text: String,
    /// Structured fields extracted from the OCR text.
    pub extracted: ExtractionResult,
}

impl ScanResult {
    fn empty() -> Self {
        Self { ocr_text: String::new(), extracted: ExtractionResult::empty() }
    }
}

pub struct ReceiptScanner<R: OcrBackend> {
    recognizer: R,
    extractor: Extractor,
}

impl<R: OcrBackend> ReceiptScanner<R> {
    pub fn new(recognizer: R, config: ExtractorConfig) -> Self {
        Self { recognizer, extractor: Extractor::new(config) }
    }

    pub fn with_defaults(recognizer: R) -> Self {
        Self::new(recognizer, ExtractorConfig::default())
    }

    /// Scan raw image bytes (camera capture or uploaded file content).
    /// Infallible by contract: completeness of the result is a
    /// data-quality question for the caller, never an error.
    pub fn scan_bytes(&self, data: &[u8]) -> ScanResult {
        let image_bytes = match preprocess::prepare_for_ocr_from_bytes(data) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(%err, "image preprocessing failed; returning empty result");
                return ScanResult::empty();
            }
        };

        let ocr_text = match self.recognizer.recognize(&image_bytes) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "ocr backend failed; returning empty result");
                return ScanResult::empty();
            }
        };

        let extracted = self.extractor.extract(&ocr_text);
        ScanResult { ocr_text, extracted }
    }

    /// Scan an image file on disk. Only the file read itself can fail.
    pub async fn scan_file(&self, path: &Path) -> Result<ScanResult, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        Ok(self.scan_bytes(&bytes))
    }
}
