//! Generator version information.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time and is stamped into artifact headers
//!   and the CLI `--version` output.

/// The stringify-gen version string (for example, `0.1.0`).
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
