//! Field extraction for photographed Malaysian merchant receipts.
//!
//! The pipeline is: image bytes → [`preprocess`] → an [`OcrBackend`] →
//! raw text → [`normalize`] → five independent extraction passes
//! ([`merchant`], [`meta`], [`items`], [`amounts`], [`payment`]) →
//! [`aggregate`] → a structured [`ExtractionResult`].
//!
//! Extraction never fails: every field the passes cannot read is left
//! absent, and collaborator failures (image decode, OCR engine) collapse
//! to an empty result rather than an error.

pub mod aggregate;
pub mod amounts;
pub mod extract;
pub mod items;
pub mod merchant;
pub mod meta;
pub mod normalize;
pub mod payment;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;

pub use extract::Extractor;
pub use pipeline::{PipelineError, ReceiptScanner, ScanResult};
pub use preprocess::{prepare_for_ocr, prepare_for_ocr_from_bytes, PreprocessError};
pub use recognizer::{FixedTextRecognizer, OcrBackend, OcrError};
pub use resit_core::{
    Amounts, ExtractionResult, ExtractorConfig, LineItem, Merchant, PaymentMethod, ReceiptMeta,
};

/// Lazily compiled regex, cached for the process lifetime.
macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}
pub(crate) use re;
