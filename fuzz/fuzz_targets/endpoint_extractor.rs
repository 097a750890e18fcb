//! Fuzz target for the JDBC URL endpoint extractor.
//!
//! Structured input keeps most cases inside a recognised dialect so the
//! field-position and descriptor branches are reached.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_endpoint_extractor
//! ```

#![no_main]

use arbitrary::Arbitrary;
use dbprobe_core::endpoint::extract_endpoint;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Prefix {
    Oracle,
    SqlServer,
    None,
}

#[derive(Debug, Arbitrary)]
struct FuzzUrl {
    prefix: Prefix,
    oracle_driver: bool,
    body: String,
}

fuzz_target!(|input: FuzzUrl| {
    let url = match input.prefix {
        Prefix::Oracle => format!("jdbc:oracle:thin:@{}", input.body),
        Prefix::SqlServer => format!("jdbc:sqlserver://{}", input.body),
        Prefix::None => input.body,
    };
    let driver = if input.oracle_driver {
        "oracle.jdbc.OracleDriver"
    } else {
        "com.microsoft.sqlserver.jdbc.SQLServerDriver"
    };

    // Extraction returns errors for bad input, never panics
    if let Ok(endpoint) = extract_endpoint(&url, driver) {
        assert_eq!(endpoint.host, endpoint.host.trim());
        assert_eq!(endpoint.port, endpoint.port.trim());
    }
});
