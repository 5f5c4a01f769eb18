use std::thread;

use tracing::debug;

use crate::extractors::{Extractor, FieldValue};
use crate::normalize::NormalizedText;
use crate::record::WhoisRecord;

/// Runs the field extractors over a whois response and merges their results.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhoisParser;

impl WhoisParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw whois response. Never fails: fields that cannot be found
    /// are left empty.
    ///
    /// Every extractor runs on its own scoped thread against the same
    /// normalized text. Results are merged after all of them have joined.
    pub fn parse(&self, raw: &str) -> WhoisRecord {
        let text = NormalizedText::new(raw);

        let values: Vec<FieldValue> = thread::scope(|scope| {
            let handles: Vec<_> = Extractor::ALL
                .into_iter()
                .map(|extractor| {
                    let text = &text;
                    scope.spawn(move || extractor.run(text, raw))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(value) => value,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        Self::assemble(text, values)
    }

    /// Same as [`parse`](Self::parse), with every extractor on the calling
    /// thread.
    pub fn parse_sequential(&self, raw: &str) -> WhoisRecord {
        let text = NormalizedText::new(raw);
        let values = Extractor::ALL
            .into_iter()
            .map(|extractor| extractor.run(&text, raw))
            .collect();
        Self::assemble(text, values)
    }

    fn assemble(text: NormalizedText, values: Vec<FieldValue>) -> WhoisRecord {
        let lines = text.len();
        let mut record = WhoisRecord {
            raw_text: text.into_text(),
            ..Default::default()
        };

        for value in values {
            match value {
                FieldValue::Abuse(abuse) => record.abuse = abuse,
                FieldValue::Admin(admin) => record.admin = admin,
                FieldValue::Domain(domain) => record.domain = domain,
                FieldValue::ExpiresAt(expires_at) => record.expires_at = expires_at,
                FieldValue::NameServers(name_servers) => record.name_servers = name_servers,
                FieldValue::RegisteredAt(registered_at) => record.registered_at = registered_at,
                FieldValue::UpdatedAt(updated_at) => record.updated_at = updated_at,
                FieldValue::Registrant(registrant) => record.registrant = registrant,
                FieldValue::Registrar(registrar) => record.registrar = registrar,
                FieldValue::Statuses(statuses) => record.statuses = statuses,
                FieldValue::Tech(tech) => record.tech = tech,
                FieldValue::RateLimited(limited) => record.is_rate_limited = limited,
            }
        }

        debug!(
            "Parsed {} lines: {} values found, rate limited: {}",
            lines,
            record.found_fields(),
            record.is_rate_limited
        );
        record
    }

    pub fn parse_with_analysis(&self, raw: &str) -> (WhoisRecord, Vec<String>) {
        let mut analysis = Vec::new();

        let record = self.parse(raw);
        let dropped = NormalizedText::new(raw).dropped_lines();

        analysis.push("=== PARSING ANALYSIS ===".to_string());
        analysis.push(format!("✓ Domain: {}", or_not_found(record.domain.as_deref())));
        analysis.push(format!("✓ Registrar: {}", or_not_found(record.registrar.as_deref())));
        analysis.push(format!("✓ Registered At: {}", timestamp_or_not_found(record.registered_at)));
        analysis.push(format!("✓ Updated At: {}", timestamp_or_not_found(record.updated_at)));
        analysis.push(format!("✓ Expires At: {}", timestamp_or_not_found(record.expires_at)));
        analysis.push(format!(
            "✓ Registrant Name: {}",
            or_not_found(record.registrant.name.as_deref())
        ));
        analysis.push(format!("✓ Name Servers: {} found", record.name_servers.len()));
        analysis.push(format!("✓ Statuses: {} found", record.statuses.len()));
        analysis.push(format!("✓ Rate Limited: {}", record.is_rate_limited));
        analysis.push(format!("✓ Footer Lines Dropped: {}", dropped));

        for (label, needle) in [("REGISTRANT", "registrant"), ("EXPIR", "expir")] {
            analysis.push(format!("\n=== LINES CONTAINING '{}' ===", label));
            for (i, line) in record.raw_text.lines().enumerate() {
                if line.to_lowercase().contains(needle) {
                    analysis.push(format!("Line {}: {}", i + 1, line));
                }
            }
        }

        (record, analysis)
    }
}

fn or_not_found(value: Option<&str>) -> &str {
    value.unwrap_or("NOT FOUND")
}

fn timestamp_or_not_found(value: Option<i64>) -> String {
    value
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| format!("{} ({})", dt.to_rfc3339(), dt.timestamp()))
        .unwrap_or_else(|| "NOT FOUND".to_string())
}
