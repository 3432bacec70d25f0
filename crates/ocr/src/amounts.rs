//! Amounts pass: keyword-anchored monetary summary lines.
//!
//! Each line carrying a decimal amount is routed to at most one field by
//! its keywords. Rates are recorded only when a percentage token is
//! textually present on the same line — no default SST or service-charge
//! rate is ever assumed. Derivations (change from cash and total) belong
//! to the aggregator, not here, so directly-read values stay
//! distinguishable from computed ones.

use resit_core::{Amounts, ExtractorConfig};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::re;

re!(re_amount, r"(?i)(?:rm\s*)?(\d[\d,]*\.\d{2})\b");
re!(re_rate, r"(\d+(?:\.\d+)?)\s*%");

/// Parse a decimal money token; commas are thousands separators.
/// `None` means the token was malformed and its line should be skipped.
pub(crate) fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', "")).ok()
}

pub fn extract(lines: &[String], config: &ExtractorConfig) -> Amounts {
    let mut amounts = Amounts::default();

    for line in lines {
        let Some(amount) = line_amount(line) else { continue };
        let lower = line.to_lowercase();

        if contains_any(&lower, &["subtotal", "sub total", "sub-total"]) {
            amounts.subtotal.get_or_insert(amount);
        } else if lower.contains("service") && lower.contains("charge") {
            amounts.service_charge.get_or_insert(amount);
            if let Some(rate) = line_rate(line) {
                amounts.service_charge_rate.get_or_insert(rate);
            }
        } else if config.tax_keywords.iter().any(|k| lower.contains(k.as_str())) {
            amounts.sst.get_or_insert(amount);
            if let Some(rate) = line_rate(line) {
                amounts.sst_rate.get_or_insert(rate);
            }
        } else if lower.contains("rounding") || lower.contains("round adj") {
            amounts.rounding.get_or_insert(amount);
        } else if contains_any(&lower, &["total", "jumlah", "amount payable", "amount due"]) {
            // Repeated total lines keep the larger figure (grand total
            // beats a net-of-tax restatement).
            if amounts.total.map_or(true, |t| amount > t) {
                amounts.total = Some(amount);
            }
        } else if contains_any(&lower, &["cash", "tunai", "paid", "bayar"])
            && !contains_any(&lower, &["cashier", "kasir"])
        {
            amounts.cash.get_or_insert(amount);
        } else if contains_any(&lower, &["change", "balance", "baki"]) {
            amounts.change.get_or_insert(amount);
        }
    }

    amounts
}

/// The trailing amount on the line; earlier decimals are quantities or
/// unit prices.
fn line_amount(line: &str) -> Option<Decimal> {
    re_amount()
        .captures_iter(line)
        .last()
        .and_then(|c| parse_amount(c.get(1)?.as_str()))
}

fn line_rate(line: &str) -> Option<Decimal> {
    re_rate()
        .captures(line)
        .and_then(|c| Decimal::from_str(c.get(1)?.as_str()).ok())
}

fn contains_any(line: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| line.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;
    use rust_decimal::Decimal;

    fn run(text: &str) -> Amounts {
        extract(&normalize::lines(text), &ExtractorConfig::default())
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn sst_with_rate() {
        let a = run("SST (6%)            RM 0.76");
        assert_eq!(a.sst, Some(dec("0.76")));
        assert_eq!(a.sst_rate, Some(dec("6")));
    }

    #[test]
    fn sst_amount_without_rate_leaves_rate_absent() {
        let a = run("SST RM0.76");
        assert_eq!(a.sst, Some(dec("0.76")));
        assert!(a.sst_rate.is_none());
    }

    #[test]
    fn recorded_rate_is_textual_not_default() {
        let a = run("GST (8%) RM1.04");
        assert_eq!(a.sst_rate, Some(dec("8")));
    }

    #[test]
    fn service_charge_with_rate() {
        let a = run("Service Charge (10%) RM1.20");
        assert_eq!(a.service_charge, Some(dec("1.20")));
        assert_eq!(a.service_charge_rate, Some(dec("10")));
    }

    #[test]
    fn subtotal_not_mistaken_for_total() {
        let a = run("Subtotal RM12.00\nTotal RM13.41");
        assert_eq!(a.subtotal, Some(dec("12.00")));
        assert_eq!(a.total, Some(dec("13.41")));
    }

    #[test]
    fn repeated_total_keeps_larger() {
        let a = run("Total RM13.41\nGrand Total RM15.00");
        assert_eq!(a.total, Some(dec("15.00")));
    }

    #[test]
    fn malay_total_keyword() {
        let a = run("Jumlah RM97.70");
        assert_eq!(a.total, Some(dec("97.70")));
    }

    #[test]
    fn cash_and_change_lines() {
        let a = run("CASH 20.00\nCHANGE 6.59");
        assert_eq!(a.cash, Some(dec("20.00")));
        assert_eq!(a.change, Some(dec("6.59")));
    }

    #[test]
    fn cashier_line_is_not_cash() {
        let a = run("Cashier: RM0.00");
        assert!(a.cash.is_none());
    }

    #[test]
    fn rounding_adjustment() {
        let a = run("Rounding RM0.02");
        assert_eq!(a.rounding, Some(dec("0.02")));
    }

    #[test]
    fn trailing_amount_wins_on_multi_amount_line() {
        let a = run("Total 2 x 5.00 RM10.00");
        assert_eq!(a.total, Some(dec("10.00")));
    }

    #[test]
    fn line_without_amount_is_ignored() {
        let a = run("Total due on delivery\nSST applies");
        assert_eq!(a, Amounts::default());
    }

    #[test]
    fn empty_input_is_all_absent() {
        assert_eq!(run(""), Amounts::default());
    }
}
