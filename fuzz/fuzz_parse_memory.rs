//! Fuzz target for the INI parser's in-memory entry point.
//!
//! Run with: cargo +nightly fuzz run fuzz_parse_memory
//!
//! Same classification as `fuzz_parse`, without the candidate file round
//! trip, so it runs considerably more executions per second.

#![no_main]

use inifuzz_config::IniConfig;
use inifuzz_core::IniParser;
use inifuzz_core::driver::classify;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let result = IniConfig::from_bytes("<memory>", data);
    if let Err(err) = classify(&IniParser, result).into_result() {
        panic!("unexpected failure: {err}");
    }
});
