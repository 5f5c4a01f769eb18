//! # Whois Parser Library
//!
//! Turns free-text whois server responses into a normalized [`WhoisRecord`].
//!
//! ## Features
//!
//! - Footer-aware text normalization (trailing `#` disclaimers are ignored)
//! - Twelve independent keyword-driven extractors run concurrently
//! - Multi-layout date parsing to Unix timestamps
//! - Rate-limit response detection
//! - Stable JSON output with absent fields omitted
//!
//! ## Quick Start
//!
//! ```rust
//! let raw = "Domain Name: EXAMPLE.COM\nRegistrar: Example Registrar, Inc.\n";
//! let record = whois_parser::parse(raw);
//!
//! assert_eq!(record.domain.as_deref(), Some("EXAMPLE.COM"));
//! assert_eq!(record.registrar.as_deref(), Some("Example Registrar, Inc."));
//! ```

pub mod config;
pub mod dates;
pub mod errors;
pub mod extractors;
pub mod matcher;
pub mod metrics;
pub mod normalize;
pub mod parser;
pub mod record;

// Re-export main types for easy access
pub use crate::config::Config;
pub use crate::errors::WhoisError;
pub use crate::normalize::NormalizedText;
pub use crate::parser::WhoisParser;
pub use crate::record::{AbuseInfo, ContactInfo, WhoisRecord};

/// Parse a raw whois response with the default parser.
pub fn parse(raw: &str) -> WhoisRecord {
    WhoisParser::new().parse(raw)
}

/// Parse a raw whois response and render it as pretty-printed JSON.
///
/// Extraction itself cannot fail; the only error is a serialization failure,
/// which is reported rather than collapsed into an empty string.
pub fn parse_to_json(raw: &str) -> Result<String, WhoisError> {
    parse(raw).to_json_pretty()
}

/// Parse on tokio's blocking pool, for callers inside an async runtime.
pub async fn parse_async(raw: String) -> Result<WhoisRecord, WhoisError> {
    let record = tokio::task::spawn_blocking(move || parse(&raw)).await?;
    Ok(record)
}

/// Reject input that cannot be a whois response: empty, whitespace-only, or
/// larger than `max_size` bytes.
pub fn validate_input(raw: &str, max_size: usize) -> Result<(), WhoisError> {
    if raw.len() > max_size {
        return Err(WhoisError::InputTooLarge {
            size: raw.len(),
            limit: max_size,
        });
    }

    if raw.trim().is_empty() {
        return Err(WhoisError::InvalidInput("Empty whois response".to_string()));
    }

    Ok(())
}
