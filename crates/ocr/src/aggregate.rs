//! Aggregator: merges the five partial results into one record.
//!
//! The only cross-field derivation is `change = cash − total` when the
//! change line itself was not read. Conflicts between fields (items not
//! summing to the printed subtotal, say) are surfaced as-is: OCR noise
//! makes silent correction unsafe, so judging quality is the caller's
//! job.

use resit_core::{Amounts, ExtractionResult, LineItem, Merchant, PaymentMethod, ReceiptMeta};

pub fn merge(
    merchant: Merchant,
    receipt: ReceiptMeta,
    items: Vec<LineItem>,
    mut amounts: Amounts,
    payment_method: Option<PaymentMethod>,
    raw_text: String,
) -> ExtractionResult {
    if amounts.change.is_none() {
        if let (Some(cash), Some(total)) = (amounts.cash, amounts.total) {
            amounts.change = Some(cash - total);
        }
    }

    ExtractionResult { merchant, receipt, items, amounts, payment_method, raw_text }
}
