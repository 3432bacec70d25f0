//! Receipt metadata pass: number, date, and time over the whole text.
//!
//! Date and time are returned as the matched substrings. Printed formats
//! are too varied to normalize, and an invalid-but-printed date is still
//! worth surfacing to the caller.

use resit_core::ReceiptMeta;

use crate::re;

// Receipt-number patterns, highest priority first. The `#` marker is a
// strong enough signal to bypass the plausibility guards below.
re!(re_num_hash, r"#\s*(\d+-\d+)");
re!(re_num_keyword, r"(?i)\b(?:RECEIPT|INVOICE|BILL|NO)[:\s#]+([A-Z0-9-]{3,})");
re!(re_num_abbrev, r"(?i)\b(?:REC|INV|BIL)\s*[-:#]\s*([A-Z0-9-]{3,})");
re!(re_num_malay, r"(?i)\b(?:Resit|Invois)[:\s#]+([A-Z0-9-]{3,})");
re!(re_date_led, r"^\d{1,2}[/-]\d");

// Date patterns in fixed priority order; first successful match wins and
// no calendar validation is attempted.
re!(re_date_numeric, r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b");
re!(
    re_date_malay,
    r"(?i)\b(\d{1,2}\s+(?:Jan|Feb|Mac|Apr|Mei|Jun|Jul|Ogo|Sep|Okt|Nov|Dis)[a-z]*\s+\d{2,4})\b"
);
re!(
    re_date_english,
    r"(?i)\b(\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{2,4})\b"
);

re!(re_time, r"\b(\d{1,2}:\d{2}(?::\d{2})?)\b");

pub fn extract(lines: &[String]) -> ReceiptMeta {
    let text = lines.join("\n");
    ReceiptMeta {
        number: find_number(&text),
        date: find_date(&text),
        time: re_time().captures(&text).map(|c| c[1].to_string()),
    }
}

fn find_number(text: &str) -> Option<String> {
    if let Some(c) = re_num_hash().captures(text) {
        return Some(c[1].to_string());
    }
    for pattern in [re_num_keyword(), re_num_abbrev(), re_num_malay()] {
        if let Some(candidate) = pattern.captures(text).map(|c| c[1].to_string()) {
            if plausible_number(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Keyword-anchored matches pick up a lot of OCR noise; reject tokens
/// that are really dates, long bare digit runs, or 5-digit postal codes.
fn plausible_number(candidate: &str) -> bool {
    if re_date_led().is_match(candidate) {
        return false;
    }
    let digits: String = candidate.chars().filter(|c| *c != '-').collect();
    if digits.chars().all(|c| c.is_ascii_digit()) && digits.len() > 7 {
        return false;
    }
    !(candidate.len() == 5 && candidate.chars().all(|c| c.is_ascii_digit()))
}

fn find_date(text: &str) -> Option<String> {
    for pattern in [re_date_numeric(), re_date_malay(), re_date_english()] {
        if let Some(c) = pattern.captures(text) {
            return Some(c[1].to_string());
        }
    }
    None
}
