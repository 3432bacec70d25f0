//! Payment method pass: a single case-insensitive keyword scan.
//!
//! The configured rule whose keyword occurs earliest in the text wins;
//! ties break by table order. No keyword at all leaves the method absent
//! — `PaymentMethod::Unknown` is reserved for callers with an explicit
//! unrecognized-but-present marker and is never produced here.

use resit_core::{ExtractorConfig, PaymentMethod};

pub fn extract(text: &str, config: &ExtractorConfig) -> Option<PaymentMethod> {
    let lower = text.to_lowercase();
    config
        .payment_rules
        .iter()
        .filter_map(|rule| {
            lower
                .find(&rule.keyword.to_lowercase())
                .map(|pos| (pos, &rule.method))
        })
        // min_by_key keeps the first of equal keys, i.e. table order.
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, method)| method.clone())
}
