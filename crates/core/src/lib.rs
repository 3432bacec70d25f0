pub mod config;
pub mod receipt;

pub use config::{ConfigError, ExtractorConfig, PaymentRule};
pub use receipt::{Amounts, ExtractionResult, LineItem, Merchant, PaymentMethod, ReceiptMeta};
