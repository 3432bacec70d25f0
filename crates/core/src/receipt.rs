use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Merchant identity, read best-effort from the receipt header.
/// Any field may be absent — header layouts vary wildly across merchants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    pub name: Option<String>,
    /// SSM business registration number, as printed.
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Receipt-level metadata. Date and time are kept as the matched text:
/// printed date formats are too heterogeneous to normalize safely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptMeta {
    pub number: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// One purchased entry, in print order. `quantity` and `unit_price` are
/// filled when the receipt prints a `"2 x RM1.00"` breakdown line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    /// Printed line total.
    pub price: Decimal,
    pub quantity: Option<u32>,
    pub unit_price: Option<Decimal>,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self { name: name.into(), price, quantity: None, unit_price: None }
    }
}

/// Monetary summary block. Every field is optional: a value is present
/// only when a keyword-anchored line was actually read (or, for `change`,
/// derived by the aggregator from cash and total).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amounts {
    pub subtotal: Option<Decimal>,
    pub service_charge: Option<Decimal>,
    pub service_charge_rate: Option<Decimal>,
    pub sst: Option<Decimal>,
    pub sst_rate: Option<Decimal>,
    pub rounding: Option<Decimal>,
    pub total: Option<Decimal>,
    pub cash: Option<Decimal>,
    pub change: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    TouchNGo,
    GrabPay,
    Boost,
    ShopeePay,
    Qr,
    OnlineTransfer,
    Other(String),
    /// Explicit unrecognized-but-present marker. The keyword extractor
    /// never produces this — "not mentioned" is `None`, not `Unknown`.
    Unknown,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::Card => write!(f, "Card"),
            PaymentMethod::TouchNGo => write!(f, "Touch n Go"),
            PaymentMethod::GrabPay => write!(f, "GrabPay"),
            PaymentMethod::Boost => write!(f, "Boost"),
            PaymentMethod::ShopeePay => write!(f, "ShopeePay"),
            PaymentMethod::Qr => write!(f, "QR Payment"),
            PaymentMethod::OnlineTransfer => write!(f, "Online Transfer"),
            PaymentMethod::Other(s) => write!(f, "{s}"),
            PaymentMethod::Unknown => write!(f, "Unknown"),
        }
    }
}

/// The full structured record for one receipt. The original OCR text is
/// retained verbatim so callers can debug extraction misses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub merchant: Merchant,
    pub receipt: ReceiptMeta,
    pub items: Vec<LineItem>,
    pub amounts: Amounts,
    pub payment_method: Option<PaymentMethod>,
    pub raw_text: String,
}

impl ExtractionResult {
    /// Structurally complete, entirely-absent result — the outcome for
    /// empty OCR text or a failed OCR collaborator.
    pub fn empty() -> Self {
        Self::default()
    }
}
