//! Integration example showing how to use whois-parser in an async application
//!
//! This example demonstrates:
//! - Input validation and error handling
//! - Batch parsing on the blocking pool
//! - Rate-limit detection

use std::time::Instant;
use whois_parser::{parse_async, validate_input, WhoisError};

const MAX_INPUT: usize = 64 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("whois_parser=info")
        .init();

    println!("1. Validation and error handling");
    validation_example();

    println!("\n2. Batch parsing");
    batch_parsing_example().await?;

    Ok(())
}

fn validation_example() {
    let cases = [
        ("Domain Name: example.com", true),
        ("   \n  ", false),
    ];

    for (raw, should_succeed) in cases {
        match validate_input(raw, MAX_INPUT) {
            Ok(()) if should_succeed => println!("   ok: accepted {:?}", raw),
            Ok(()) => println!("   unexpected: accepted {:?}", raw),
            Err(WhoisError::InvalidInput(reason)) if !should_succeed => {
                println!("   ok: rejected ({})", reason)
            }
            Err(e) => println!("   error: {}", e),
        }
    }
}

async fn batch_parsing_example() -> Result<(), Box<dyn std::error::Error>> {
    let responses = vec![
        "Domain Name: GITHUB.COM\nRegistrar: MarkMonitor Inc.\nCreation Date: 2007-10-09T18:20:50Z",
        "domain: example.de\nNserver: ns1.example.de\nChanged: 2023-05-04T10:11:12+02:00",
        "WHOIS LIMIT EXCEEDED - SEE WWW.PIR.ORG/WHOIS FOR DETAILS",
    ];

    let start = Instant::now();
    let mut handles = Vec::new();
    for raw in responses {
        handles.push(tokio::spawn(parse_async(raw.to_string())));
    }

    for handle in handles {
        let record = handle.await??;
        if record.is_rate_limited {
            println!("   rate limited, retry later");
            continue;
        }
        println!(
            "   {}: registrar={}, registered_at={:?}, updated_at={:?}",
            record.domain.as_deref().unwrap_or("Unknown"),
            record.registrar.as_deref().unwrap_or("Unknown"),
            record.registered_at,
            record.updated_at,
        );
    }

    println!("   Parsed in {:?}", start.elapsed());
    Ok(())
}
