#![deny(unsafe_code)]

//! Shared test utilities for the inifuzz workspace.
//!
//! Provides input fixtures, stub parsers, a scoped working directory, and
//! tracing helpers so that individual crate tests stay concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! inifuzz-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod fixtures;
pub mod stub_parser;
pub mod tracing_setup;
pub mod workdir;
