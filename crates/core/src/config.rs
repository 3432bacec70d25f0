use serde::Deserialize;
use thiserror::Error;

use crate::receipt::PaymentMethod;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse extractor config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Keyword configuration injected into the extraction passes, so new
/// locales or merchant types can be covered without code changes.
/// Defaults carry the Malaysian keyword sets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// How many normalized lines count as the merchant header region.
    pub header_lines: usize,
    /// Business-suffix keywords that mark the legal merchant name.
    pub merchant_keywords: Vec<String>,
    /// A line containing any of these is never a line item.
    pub non_item_keywords: Vec<String>,
    /// Keywords anchoring the tax line (amount plus optional rate).
    pub tax_keywords: Vec<String>,
    /// Payment keyword table. The rule whose keyword occurs earliest in
    /// the text wins; ties break by table order.
    pub payment_rules: Vec<PaymentRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRule {
    pub keyword: String,
    pub method: PaymentMethod,
}

impl PaymentRule {
    fn new(keyword: &str, method: PaymentMethod) -> Self {
        Self { keyword: keyword.to_string(), method }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        let strings = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            header_lines: 15,
            merchant_keywords: strings(&[
                "sdn bhd", "sdn. bhd.", "sendirian berhad", "berhad",
                "enterprise", "restaurant", "cafe", "kedai", "restoran",
                "kopitiam",
            ]),
            non_item_keywords: strings(&[
                "order:", "employee:", "cashier:", "table:", "meja:",
                "waktu operasi", "setiap hari", "self pickup", "pre order",
                "terima kasih", "jika baik", "http", "www",
                "total", "subtotal", "service charge", "sst", "gst", "tax",
                "cash", "tunai", "change", "balance", "baki", "rounding",
                "thank you", "powered by", "tel:", "phone:",
                "jumpa lagi", "beritahu", "pos:", "dine in",
                "tempahan", "melalui", "laman web",
            ]),
            tax_keywords: strings(&["sst", "gst", "tax", "cukai"]),
            payment_rules: vec![
                PaymentRule::new("touch n go", PaymentMethod::TouchNGo),
                PaymentRule::new("touchngo", PaymentMethod::TouchNGo),
                PaymentRule::new("tng", PaymentMethod::TouchNGo),
                PaymentRule::new("grabpay", PaymentMethod::GrabPay),
                PaymentRule::new("boost", PaymentMethod::Boost),
                PaymentRule::new("shopee", PaymentMethod::ShopeePay),
                PaymentRule::new("cash", PaymentMethod::Cash),
                PaymentRule::new("tunai", PaymentMethod::Cash),
                PaymentRule::new("credit", PaymentMethod::Card),
                PaymentRule::new("debit", PaymentMethod::Card),
                PaymentRule::new("visa", PaymentMethod::Card),
                PaymentRule::new("mastercard", PaymentMethod::Card),
                PaymentRule::new("card", PaymentMethod::Card),
                PaymentRule::new("qr", PaymentMethod::Qr),
                PaymentRule::new("online", PaymentMethod::OnlineTransfer),
                PaymentRule::new("transfer", PaymentMethod::OnlineTransfer),
            ],
        }
    }
}

impl ExtractorConfig {
    /// Parse a (possibly partial) TOML config; unspecified sections keep
    /// their defaults.
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }
}
