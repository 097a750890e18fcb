//! Fuzz target for the `.properties` parser and configuration validation.
//!
//! Raw bytes go through the same UTF-8 / ISO-8859-1 decoding as files on disk.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_properties_parser
//! ```

#![no_main]

use dbprobe_core::config::ConnectionConfig;
use dbprobe_core::properties::Properties;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Neither step should panic, only return errors
    if let Ok(props) = Properties::from_bytes(data) {
        let _ = ConnectionConfig::from_properties(&props);
    }
});
