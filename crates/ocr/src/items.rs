//! Line-item pass.
//!
//! Malaysian POS receipts print items in a handful of shapes:
//!
//! ```text
//! AM04 > Teh O - Ais RM3.00      item code, name, line total
//! 1 x RM3.00                     quantity breakdown on the next line
//! NS02 > Nasi Set - Sup Berempah quantity line carries the only price
//! Colek RM11.00                  plain name and price
//! 2 x Nasi Lemak RM17.00         inline quantity
//! ```
//!
//! Patterns are tried per line in the order above. Summary lines (totals,
//! tax, cash) are routed to the amounts pass by the configured non-item
//! keyword filter, and any line whose amount fails to parse is skipped on
//! its own — one bad line never aborts the extraction.

use resit_core::{ExtractorConfig, LineItem};
use rust_decimal::Decimal;

use crate::amounts::parse_amount;
use crate::re;

// Item-code prefix: "AM04 >", "NS02:", "AM70 ". Deliberately
// case-sensitive — lowercase words are names, not codes.
re!(re_code_priced, r"^[A-Z]{2,4}\d{1,3}\s*(?:[>:]\s*)?(.+?)\s+(?:RM\s*)?(\d[\d,]*\.\d{2})\s*[|\[\]=_]*$");
re!(re_simple_priced, r"^([A-Za-z][A-Za-z0-9\s\-\+\.'&/]*?)\s+(?:RM\s*)?(\d[\d,]*\.\d{2})\s*[|\[\]=_]*$");
re!(re_inline_qty, r"(?i)^(\d+)\s*x\s+(?:[A-Z]{2,4}\d{1,3}\s*[>:]\s*)?([A-Za-z].*?)\s+(?:RM\s*)?(\d[\d,]*\.\d{2})$");
re!(re_code_name_only, r"^[A-Z]{2,4}\d{1,3}\s*(?:[>:]\s*)?([A-Za-z].*)$");

// Quantity breakdown line, e.g. "1 x RM3.00" or "2x RM1.00".
re!(re_quantity, r"(?i)^(\d+)\s*x\s*RM\s*(\d+[.,]\d{2})");
re!(re_qty_ocr_lead, r"(?i)^[Il|]\s*x");
re!(re_trailing_junk, r"[\s_|]+$");

re!(re_code_prefix, r"^[A-Z]{2,4}\d{1,3}\s*(?:[>:]\s*)?");
re!(re_separator_only, r"^[\s\-_=<>|]+$");
re!(re_datetime_led, r"^\d{1,2}/\d{1,2}/\d{2,4}\s+\d{1,2}:\d{2}");
re!(re_rm_led, r"(?i)^rm\d");

/// `unit × qty` must land within 5 sen of the printed line total for a
/// quantity line to be attached to the item above it.
fn qty_tolerance() -> Decimal {
    Decimal::new(5, 2)
}

pub fn extract(lines: &[String], config: &ExtractorConfig) -> Vec<LineItem> {
    let mut items = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];

        if skip_line(line, config) {
            i += 1;
            continue;
        }

        // Inline quantity: "2 x Nasi Lemak RM17.00".
        if let Some(c) = re_inline_qty().captures(line) {
            if let (Ok(qty), Some(price)) = (c[1].parse::<u32>(), parse_amount(&c[3])) {
                if let Some(name) = clean_name(&c[2]) {
                    let mut item = LineItem::new(name, price);
                    if qty > 0 {
                        item.quantity = Some(qty);
                        item.unit_price = Some((price / Decimal::from(qty)).round_dp(2));
                    }
                    items.push(item);
                }
            }
            i += 1;
            continue;
        }

        // Name and line total on one line, optionally code-prefixed.
        if let Some((raw_name, amount_str)) = match_priced(line) {
            if let Some(price) = parse_amount(amount_str) {
                if let Some(name) = clean_name(raw_name) {
                    let mut item = LineItem::new(name, price);
                    if let Some((qty, unit, offset)) = find_quantity_line(lines, i) {
                        if (unit * Decimal::from(qty) - price).abs() < qty_tolerance() {
                            item.quantity = Some(qty);
                            item.unit_price = Some(unit);
                            items.push(item);
                            i += offset + 1;
                            continue;
                        }
                    }
                    items.push(item);
                }
            }
            // Unparseable amount or junk name: drop this line only.
            i += 1;
            continue;
        }

        // Coded name with no price of its own; the quantity line below
        // carries the figures.
        if let Some(c) = re_code_name_only().captures(line) {
            let raw_name = c[1].to_string();
            if !raw_name.to_uppercase().contains("RM") {
                if let Some(name) = clean_name(&raw_name) {
                    if let Some((qty, unit, offset)) = find_quantity_line(lines, i) {
                        let mut item =
                            LineItem::new(name, (unit * Decimal::from(qty)).round_dp(2));
                        item.quantity = Some(qty);
                        item.unit_price = Some(unit);
                        items.push(item);
                        i += offset + 1;
                        continue;
                    }
                }
            }
        }

        i += 1;
    }

    items
}

fn skip_line(line: &str, config: &ExtractorConfig) -> bool {
    if line.len() < 3 || re_separator_only().is_match(line) || re_datetime_led().is_match(line) {
        return true;
    }
    // Bare quantity breakdowns never become items of their own.
    if re_quantity().is_match(&normalize_quantity_text(line)) {
        return true;
    }
    let lower = line.to_lowercase();
    config.non_item_keywords.iter().any(|k| lower.contains(k.as_str()))
}

fn match_priced(line: &str) -> Option<(&str, &str)> {
    let c = re_code_priced()
        .captures(line)
        .or_else(|| re_simple_priced().captures(line))?;
    Some((c.get(1)?.as_str(), c.get(2)?.as_str()))
}

/// Look just below the item line for a `"<n> x RM<unit>"` breakdown,
/// skipping separator debris. Any other content line ends the search.
fn find_quantity_line(lines: &[String], idx: usize) -> Option<(u32, Decimal, usize)> {
    for offset in 1..=2 {
        let Some(line) = lines.get(idx + offset) else { break };
        let norm = normalize_quantity_text(line);
        if norm.len() < 3 || re_separator_only().is_match(&norm) {
            continue;
        }
        let c = re_quantity().captures(&norm)?;
        let qty: u32 = c[1].parse().ok()?;
        let unit = parse_amount(&c[2].replace(',', "."))?;
        if qty == 0 {
            return None;
        }
        return Some((qty, unit, offset));
    }
    None
}

/// OCR habitually reads a leading `1` as `I`, `l`, or `|` on quantity
/// lines, and tacks pipe/underscore debris onto the end.
fn normalize_quantity_text(line: &str) -> String {
    let led = re_qty_ocr_lead().replace(line, "1 x");
    re_trailing_junk().replace(&led, "").trim().to_string()
}

/// Strip code prefixes and OCR debris; `None` means the line had a price
/// but no parseable description and should be treated as noise.
fn clean_name(raw: &str) -> Option<String> {
    let stripped = re_code_prefix().replace(raw.trim(), "");
    let trimmed = stripped.trim_matches(|c: char| " -_>:|[]=".contains(c));
    let name = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    if valid_name(&name) {
        Some(name)
    } else {
        None
    }
}

fn valid_name(name: &str) -> bool {
    if name.len() < 2 || !name.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    if re_rm_led().is_match(name) {
        return false;
    }
    // Common OCR fragments that look like words but never name an item.
    !matches!(
        name.to_lowercase().as_str(),
        "sa" | "ota" | "qr" | "pg" | "sp" | "bh" | "pos" | "dine in"
    )
}
