//! Parse a whois response from a file (or a built-in sample) and print JSON
//!
//! Run with: cargo run --example simple_parse -- path/to/response.txt

use whois_parser::WhoisParser;

const SAMPLE: &str = "\
Domain Name: RUST-LANG.ORG
Registry Domain ID: 2c8d5a4ba3b8444f9b1a2d7e9f1e2a3b-LROR
Registrar WHOIS Server: http://whois.registrar.test
Updated Date: 2024-02-10T15:24:11Z
Creation Date: 2010-02-15T02:31:14Z
Registry Expiry Date: 2026-02-15T02:31:14Z
Registrar: Example Registrar, LLC
Registrar Abuse Contact Email: abuse@registrar.test
Registrar Abuse Contact Phone: +1.4805058800
Domain Status: clientTransferProhibited https://icann.org/epp#clientTransferProhibited
Registrant Organization: Rust Foundation
Name Server: NS1.EXAMPLE-DNS.TEST
Name Server: NS2.EXAMPLE-DNS.TEST
# The data in this record is provided for information purposes only.
# Terms of use apply.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("whois_parser=debug")
        .init();

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };

    let parser = WhoisParser::new();
    let (record, analysis) = parser.parse_with_analysis(&raw);

    for line in &analysis {
        println!("{}", line);
    }

    println!("\n{}", record.to_json_pretty()?);
    Ok(())
}
