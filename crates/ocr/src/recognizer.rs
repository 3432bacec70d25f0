//! OCR backend abstraction. The extraction engine treats OCR as an
//! opaque text-producing collaborator: implementations take binarized
//! PNG/JPEG bytes and return the recognized text, or fail — and a
//! failure is absorbed upstream as "no text to extract".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("OCR engine unavailable — build with the `tesseract` feature")]
    Unavailable,
}

pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

// ── Test backends (always available) ──────────────────────────────────────────

/// Returns a pre-set string regardless of input — lets the extraction
/// pipeline be exercised without Tesseract installed.
pub struct FixedTextRecognizer {
    pub text: String,
}

impl FixedTextRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for FixedTextRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Always fails — for asserting the pipeline's empty-result short-circuit.
pub struct FailingRecognizer;

impl OcrBackend for FailingRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::Unavailable)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;

    /// Malaysian receipts mix English and Malay, so the default language
    /// pack is the combined `eng+msa`.
    pub const DEFAULT_LANG: &str = "eng+msa";

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl Default for TesseractRecognizer {
        fn default() -> Self {
            Self::new(None, DEFAULT_LANG)
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}
