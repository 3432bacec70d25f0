//! Extraction front door: normalize, run the five passes, aggregate.

use resit_core::{ExtractionResult, ExtractorConfig};

use crate::{aggregate, amounts, items, merchant, meta, normalize, payment};

/// Stateless extraction engine. Construction fixes the keyword
/// configuration; `extract` is pure over its input and safe to call from
/// any number of threads.
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Turn raw OCR text into a structured record. Never fails: fields
    /// the passes cannot read are absent, and empty input produces a
    /// structurally complete, entirely-absent result.
    pub fn extract(&self, raw_text: &str) -> ExtractionResult {
        let lines = normalize::lines(raw_text);

        let merchant = merchant::extract(&lines, &self.config);
        let receipt = meta::extract(&lines);
        let items = items::extract(&lines, &self.config);
        let amounts = amounts::extract(&lines, &self.config);
        let payment_method = payment::extract(raw_text, &self.config);

        tracing::debug!(
            lines = lines.len(),
            items = items.len(),
            has_total = amounts.total.is_some(),
            merchant = merchant.name.as_deref().unwrap_or(""),
            "extraction pass complete"
        );

        aggregate::merge(merchant, receipt, items, amounts, payment_method, raw_text.to_string())
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resit_core::PaymentMethod;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    const SAMPLE: &str = "\
Restoran Khun Mae Sdn Bhd
( 1450014-P )
No 3, Jalan Bpp 5/3
43300 Seri Kembangan
Tel: 03-89456123

AM04 > Teh O - Ais RM3.00
1x RM3.00
Nasi Lemak          RM 8.50
Colek RM11.00

Subtotal RM22.50
SST (6%) RM1.35
Total RM23.85
CASH RM50.00
5/12/25 9:28 PTG #8-37833
Terima kasih!";

    #[test]
    fn full_receipt_end_to_end() {
        let r = Extractor::default().extract(SAMPLE);

        assert_eq!(r.merchant.name.as_deref(), Some("Restoran Khun Mae Sdn Bhd"));
        assert_eq!(r.merchant.registration_number.as_deref(), Some("1450014-P"));
        assert_eq!(
            r.merchant.address.as_deref(),
            Some("( 1450014-P ), No 3, Jalan Bpp 5/3, 43300 Seri Kembangan"),
        );
        assert_eq!(r.merchant.phone.as_deref(), Some("03-89456123"));

        assert_eq!(r.receipt.number.as_deref(), Some("8-37833"));
        assert_eq!(r.receipt.date.as_deref(), Some("5/12/25"));
        assert_eq!(r.receipt.time.as_deref(), Some("9:28"));

        let names: Vec<&str> = r.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Teh O - Ais", "Nasi Lemak", "Colek"]);

        assert_eq!(r.amounts.subtotal, Some(dec("22.50")));
        assert_eq!(r.amounts.sst, Some(dec("1.35")));
        assert_eq!(r.amounts.sst_rate, Some(dec("6")));
        assert_eq!(r.amounts.total, Some(dec("23.85")));
        assert_eq!(r.amounts.cash, Some(dec("50.00")));
        // Derived by the aggregator; no change line is printed.
        assert_eq!(r.amounts.change, Some(dec("26.15")));

        assert_eq!(r.payment_method, Some(PaymentMethod::Cash));
        assert_eq!(r.raw_text, SAMPLE);
    }

    #[test]
    fn extraction_is_idempotent() {
        let e = Extractor::default();
        assert_eq!(e.extract(SAMPLE), e.extract(SAMPLE));
    }

    #[test]
    fn empty_text_yields_complete_empty_result() {
        let r = Extractor::default().extract("");
        assert_eq!(r, ExtractionResult::empty());

        let json = serde_json::to_value(&r).unwrap();
        for key in ["merchant", "receipt", "items", "amounts", "payment_method", "raw_text"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn garbage_input_does_not_panic() {
        let r = Extractor::default().extract("!@#$%^&*()\n\u{0}\u{1}\u{2}");
        assert!(r.items.is_empty());
    }

    #[test]
    fn raw_text_retained_verbatim() {
        let noisy = "  weird   spacing \nkept exactly ";
        let r = Extractor::default().extract(noisy);
        assert_eq!(r.raw_text, noisy);
    }

    #[test]
    fn custom_config_is_honored() {
        let cfg = ExtractorConfig::from_toml(
            r#"
            [[payment_rules]]
            keyword = "duitnow"
            method = "Qr"
            "#,
        )
        .unwrap();
        let r = Extractor::new(cfg).extract("Paid by DuitNow\nTotal RM5.00");
        assert_eq!(r.payment_method, Some(PaymentMethod::Qr));
    }
}
