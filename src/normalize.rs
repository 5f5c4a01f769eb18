//! Canonical line view of a raw whois response.
//!
//! Every extractor works on the same [`NormalizedText`]: lines trimmed once,
//! with the trailing `#` comment footer (disclaimers, terms of use) removed so
//! that keyword searches never match inside boilerplate.

use tracing::debug;

const FOOTER_MARKER: char = '#';

/// Trimmed, footer-stripped lines of a whois response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    lines: Vec<String>,
    // Lower-cased copy of `lines`, index-aligned, used for keyword matching
    folded: Vec<String>,
    dropped: usize,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        let mut lines: Vec<String> = raw.lines().map(|line| line.trim().to_string()).collect();
        let total = lines.len();

        if let Some(footer_start) = lines.iter().rposition(|line| line.starts_with(FOOTER_MARKER)) {
            lines.truncate(footer_start);
            debug!(
                "Dropped {} footer lines starting at line {}",
                total - footer_start,
                footer_start + 1
            );
        }

        let folded = lines.iter().map(|line| line.to_lowercase()).collect();
        let dropped = total - lines.len();

        Self { lines, folded, dropped }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lower-cased lines, same indices as [`lines`](Self::lines).
    pub fn folded_lines(&self) -> &[String] {
        &self.folded
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of source lines removed as footer.
    pub fn dropped_lines(&self) -> usize {
        self.dropped
    }

    pub fn as_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_every_line() {
        let text = NormalizedText::new("  Domain Name: EXAMPLE.COM  \r\n\tRegistrar: Foo\t\n");
        assert_eq!(text.lines(), &["Domain Name: EXAMPLE.COM", "Registrar: Foo"]);
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let text = NormalizedText::new("a\n\n   \nb");
        assert_eq!(text.lines(), &["a", "", "", "b"]);
    }

    #[test]
    fn test_footer_is_stripped_from_last_marker() {
        let text = NormalizedText::new("a\nb\n  # footer line\nc");
        assert_eq!(text.lines(), &["a", "b"]);
        assert_eq!(text.dropped_lines(), 2);
    }

    #[test]
    fn test_only_last_marker_starts_the_footer() {
        let text = NormalizedText::new("# header\nDomain Name: x.com\n# terms\nmore terms");
        assert_eq!(text.lines(), &["# header", "Domain Name: x.com"]);
    }

    #[test]
    fn test_no_marker_keeps_everything() {
        let raw = "Domain Name: x.com\nRegistrar: Foo\n% comment";
        let text = NormalizedText::new(raw);
        assert_eq!(text.len(), 3);
        assert_eq!(text.dropped_lines(), 0);
        assert_eq!(text.as_text(), raw);
    }

    #[test]
    fn test_marker_must_lead_the_line() {
        let text = NormalizedText::new("Registrar: Foo # bar\nDomain Name: x.com");
        assert_eq!(text.len(), 2);
    }

    #[test]
    fn test_normalizing_normalized_text_is_noop() {
        let once = NormalizedText::new("  Domain Name: x.com \n\n Registrar: Foo\n# footer\nTerms");
        let twice = NormalizedText::new(&once.as_text());
        assert_eq!(once.lines(), twice.lines());
        assert_eq!(twice.dropped_lines(), 0);
    }

    #[test]
    fn test_leading_marker_is_not_a_fixed_point() {
        let once = NormalizedText::new("# header\nDomain Name: x\n# terms");
        assert_eq!(once.lines(), &["# header", "Domain Name: x"]);

        // the header is now the last marker, so a second pass drops everything
        let twice = NormalizedText::new(&once.as_text());
        assert!(twice.is_empty());
        assert_eq!(twice.dropped_lines(), 2);
    }

    #[test]
    fn test_empty_input() {
        let text = NormalizedText::new("");
        assert!(text.is_empty());
        assert_eq!(text.into_text(), "");
    }

    #[test]
    fn test_folded_lines_align_with_lines() {
        let text = NormalizedText::new("Domain Name: EXAMPLE.COM\nRegistrar: Foo");
        assert_eq!(text.folded_lines(), &["domain name: example.com", "registrar: foo"]);
    }
}
