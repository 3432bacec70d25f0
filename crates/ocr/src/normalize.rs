//! Text normalization: the only preparation the extraction passes see.

/// Split raw OCR output into trimmed, non-empty lines with internal
/// whitespace runs collapsed to a single space. Order is preserved.
/// Always succeeds; empty input yields an empty vector.
pub fn lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(collapse_whitespace)
        .filter(|l| !l.is_empty())
        .collect()
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(lines("").is_empty());
        assert!(lines("\n\n  \n\t\n").is_empty());
    }

    #[test]
    fn preserves_line_order() {
        let out = lines("first\nsecond\n\nthird");
        assert_eq!(out, vec!["first", "second", "third"]);
    }

    #[test]
    fn collapses_internal_whitespace() {
        let out = lines("Nasi Lemak          RM 8.50");
        assert_eq!(out, vec!["Nasi Lemak RM 8.50"]);
    }

    #[test]
    fn trims_edges() {
        let out = lines("  TOTAL\tRM 12.00  ");
        assert_eq!(out, vec!["TOTAL RM 12.00"]);
    }
}
