//! Merchant identity pass: name, SSM registration, address, and phone,
//! read from the header region at the top of the receipt.

use resit_core::{ExtractorConfig, Merchant};

use crate::re;

re!(re_paren_reg, r"^\(\s*[0-9A-Z-]+\s*\)$");
re!(re_postcode, r"\b\d{5}\b");
re!(re_phone, r"\b(?:\+?60|0)\d{1,2}[-\s]?\d{7,8}\b");

// Registration-number patterns, tried in priority order: new-style
// 12-digit SSM number, old-style NNNNNNN-X, then keyword-anchored.
re!(re_reg_new, r"\b\d{12}\b");
re!(re_reg_old, r"\b\d{6,7}-[A-Z]\b");
re!(re_reg_keyword, r"(?i)\b(?:SSM|REG|NO)[:.\s]+(\d{6,}[0-9A-Z-]*)\b");

pub fn extract(lines: &[String], config: &ExtractorConfig) -> Merchant {
    let header = &lines[..lines.len().min(config.header_lines)];
    let name_idx = find_name(header, config);

    Merchant {
        name: name_idx.map(|i| header[i].clone()),
        registration_number: find_registration(header),
        address: name_idx.and_then(|i| find_address(header, i)),
        phone: find_phone(header),
    }
}

/// The first header line carrying a business-suffix keyword wins; many
/// receipts print a logo or slogan line before the legal name, so the
/// positional default (first usable line) is only a fallback.
fn find_name(header: &[String], config: &ExtractorConfig) -> Option<usize> {
    let usable: Vec<usize> = header
        .iter()
        .enumerate()
        .filter(|(_, l)| !is_noise_line(l))
        .map(|(i, _)| i)
        .collect();

    usable
        .iter()
        .copied()
        .find(|&i| {
            let lower = header[i].to_lowercase();
            config.merchant_keywords.iter().any(|k| lower.contains(k))
        })
        .or_else(|| usable.first().copied())
}

fn is_noise_line(line: &str) -> bool {
    if line.len() < 3 || re_paren_reg().is_match(line) {
        return true;
    }
    let lower = line.to_lowercase();
    ["http", "www", "@", "tel:", "phone:", "waktu operasi", "setiap hari", "order:", "employee:"]
        .iter()
        .any(|s| lower.contains(s))
}

fn find_registration(header: &[String]) -> Option<String> {
    let text = header.join("\n");
    if let Some(m) = re_reg_new().find(&text) {
        return Some(m.as_str().to_string());
    }
    if let Some(m) = re_reg_old().find(&text) {
        return Some(m.as_str().to_string());
    }
    re_reg_keyword().captures(&text).map(|c| c[1].to_string())
}

/// Address lines run from just below the name to the first line with a
/// 5-digit postal code (included) or a phone number (excluded).
fn find_address(header: &[String], name_idx: usize) -> Option<String> {
    let mut collected: Vec<&str> = Vec::new();
    for line in &header[name_idx + 1..] {
        if re_postcode().is_match(line) && !re_phone().is_match(line) {
            collected.push(line);
            return Some(collected.join(", "));
        }
        if re_phone().is_match(line) {
            break;
        }
        collected.push(line);
    }
    // Without a terminator there is no way to tell address from chatter.
    None
}

fn find_phone(header: &[String]) -> Option<String> {
    header
        .iter()
        .find_map(|l| re_phone().find(l))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;

    fn run(text: &str) -> Merchant {
        extract(&normalize::lines(text), &ExtractorConfig::default())
    }

    #[test]
    fn keyword_name_preferred_over_first_line() {
        let m = run("Selamat Datang!\nRestoran Haji Ali Sdn Bhd\nJalan Ampang");
        assert_eq!(m.name.as_deref(), Some("Restoran Haji Ali Sdn Bhd"));
    }

    #[test]
    fn falls_back_to_first_usable_line() {
        let m = run("Khun Mae Thai Muslim\nJalan Bpp 5/3\nSelangor, 43300");
        assert_eq!(m.name.as_deref(), Some("Khun Mae Thai Muslim"));
    }

    #[test]
    fn skips_registration_only_and_url_lines_for_name() {
        let m = run("( 1450014-P )\nhttps://example.com/menu\nKedai Kopi Seng Huat");
        assert_eq!(m.name.as_deref(), Some("Kedai Kopi Seng Huat"));
    }

    #[test]
    fn registration_old_format() {
        let m = run("KOPITIAM UNCLE LIM\n( 1450014-P )\nKuala Lumpur");
        assert_eq!(m.registration_number.as_deref(), Some("1450014-P"));
    }

    #[test]
    fn registration_twelve_digit_format() {
        let m = run("MAJU ENTERPRISE\n202201234567 (SSM)\nJohor Bahru");
        assert_eq!(m.registration_number.as_deref(), Some("202201234567"));
    }

    #[test]
    fn address_ends_at_postal_code_inclusive() {
        let m = run(
            "Restoran Nasi Kandar Sdn Bhd\nNo 12, Jalan Tun Razak\n50400 Kuala Lumpur\nTel 03-21612345",
        );
        assert_eq!(
            m.address.as_deref(),
            Some("No 12, Jalan Tun Razak, 50400 Kuala Lumpur"),
        );
    }

    #[test]
    fn address_absent_without_terminator() {
        let m = run("Warung Pak Mat\nSelamat datang\nTerima kasih");
        assert!(m.address.is_none());
    }

    #[test]
    fn phone_landline_and_mobile() {
        let m = run("Kafe Mesra Enterprise\n03-21612345");
        assert_eq!(m.phone.as_deref(), Some("03-21612345"));

        let m = run("Kafe Mesra Enterprise\n012-3456789");
        assert_eq!(m.phone.as_deref(), Some("012-3456789"));
    }

    #[test]
    fn all_absent_on_empty_input() {
        let m = run("");
        assert_eq!(m, Merchant::default());
    }

    #[test]
    fn name_search_limited_to_header_region() {
        let mut text = String::new();
        for i in 0..20 {
            text.push_str(&format!("line {i}\n"));
        }
        text.push_str("Restoran Tersembunyi Sdn Bhd\n");
        let m = run(&text);
        // The keyworded line sits past the header window, so the
        // positional default wins.
        assert_eq!(m.name.as_deref(), Some("line 0"));
    }
}
