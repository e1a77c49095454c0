//! Fuzz target for the INI parser, driven through a candidate file.
//!
//! Run with: cargo +nightly fuzz run fuzz_parse
//!
//! Every input is written to the candidate file and parsed from disk.
//! Syntax and decoding errors are expected; any other failure panics, which
//! libFuzzer records as a crash with the input saved as the reproducer.
//!
//! Set `INIFUZZ_CONFIG` to a TOML file to move the candidate file (e.g. to a
//! tmpfs) or raise the log level.

#![no_main]

use std::sync::OnceLock;

use inifuzz_core::{FuzzDriver, IniParser, harness};
use libfuzzer_sys::fuzz_target;

static DRIVER: OnceLock<FuzzDriver<IniParser>> = OnceLock::new();

fuzz_target!(
    init: {
        let config = harness::config_from_env()
            .unwrap_or_else(|e| panic!("invalid harness configuration: {e}"));
        let _ = DRIVER.set(harness::init(&config));
    },
    |data: &[u8]| {
        let Some(driver) = DRIVER.get() else {
            return;
        };
        if let Err(err) = driver.run_trial(data) {
            panic!("unexpected failure: {err}");
        }
    }
);
