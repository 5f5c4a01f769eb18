//! Prefix keyword matching over normalized lines.
//!
//! Lines are scanned in source order and, for each line, keywords in priority
//! order. The earliest line matching *any* keyword wins, so keyword priority
//! only breaks ties within a single line.

use crate::normalize::NormalizedText;

/// Ordered list of candidate field labels.
pub type Keywords = &'static [&'static str];

/// Value of the first line that starts with one of `keywords`.
///
/// Matching is case-insensitive. The value is everything after the first
/// colon, trimmed. Matching lines without a colon are skipped.
pub fn find_first(text: &NormalizedText, keywords: &[&str]) -> Option<String> {
    matches(text, keywords).next()
}

/// Values of every line that starts with one of `keywords`, in line order.
pub fn find_all(text: &NormalizedText, keywords: &[&str]) -> Vec<String> {
    matches(text, keywords).collect()
}

fn matches<'a>(text: &'a NormalizedText, keywords: &[&str]) -> impl Iterator<Item = String> + 'a {
    let folded_keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    text.lines()
        .iter()
        .zip(text.folded_lines())
        .filter(move |(_, folded)| {
            folded_keywords
                .iter()
                .any(|keyword| folded.starts_with(keyword.as_str()))
        })
        .filter_map(|(line, _)| value_after_colon(line))
}

/// Trimmed text after the first colon, if the line has one.
pub(crate) fn value_after_colon(line: &str) -> Option<String> {
    line.split_once(':').map(|(_, value)| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[&str]) -> NormalizedText {
        NormalizedText::new(&lines.join("\n"))
    }

    #[test]
    fn test_line_order_beats_keyword_order() {
        let text = text(&["Foo: 1", "Bar: 2"]);
        assert_eq!(find_first(&text, &["Bar", "Foo"]), Some("1".to_string()));
    }

    #[test]
    fn test_match_is_case_insensitive_prefix() {
        let text = text(&["REGISTRAR NAME: Example Registrar, LLC"]);
        assert_eq!(
            find_first(&text, &["registrar name"]),
            Some("Example Registrar, LLC".to_string())
        );
        assert_eq!(find_first(&text, &["name"]), None);
    }

    #[test]
    fn test_value_splits_at_first_colon_only() {
        let text = text(&["Registrar URL: http://www.example.com:8080/whois"]);
        assert_eq!(
            find_first(&text, &["Registrar URL"]),
            Some("http://www.example.com:8080/whois".to_string())
        );
    }

    #[test]
    fn test_line_without_colon_is_skipped() {
        let text = text(&["Registrar Example Holdings", "Registrar: Real One"]);
        assert_eq!(find_first(&text, &["Registrar"]), Some("Real One".to_string()));
    }

    #[test]
    fn test_empty_value_still_matches() {
        let text = text(&["Admin Name:", "Admin Name: Later"]);
        assert_eq!(find_first(&text, &["Admin Name"]), Some(String::new()));
    }

    #[test]
    fn test_no_match_returns_none() {
        let text = text(&["Domain Name: example.com"]);
        assert_eq!(find_first(&text, &["Registrar"]), None);
        assert!(find_all(&text, &["Registrar"]).is_empty());
    }

    #[test]
    fn test_find_all_collects_in_line_order() {
        let text = text(&[
            "Name Server: NS1.EXAMPLE.COM",
            "Domain Status: ok",
            "nserver: ns2.example.com 192.0.2.1",
            "Name Server: NS1.EXAMPLE.COM",
        ]);
        assert_eq!(
            find_all(&text, &["Name server", "Nserver"]),
            vec!["NS1.EXAMPLE.COM", "ns2.example.com 192.0.2.1", "NS1.EXAMPLE.COM"]
        );
    }

    #[test]
    fn test_find_all_counts_a_line_once() {
        let text = text(&["Nameservers: ns1.example.com"]);
        assert_eq!(
            find_all(&text, &["Nameserver", "nameservers"]),
            vec!["ns1.example.com"]
        );
    }
}
