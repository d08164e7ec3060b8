//! stringify-gen frontend
//!
//! This module turns Rust source files into declaration contexts the extraction transform understands, and renders
//! the diagnostics that come back out of the backend:
//! - `source`: reading files, module paths, directory walking
//! - `discovery`: finding `#[stringify(..)]` fields with `syn`
//! - `diagnostics`: `miette` rendering of generator diagnostics
//!
//! ## Notes
//!
//! - Nothing here decides what is a valid formatting option; discovery only converts attribute arguments to integers
//!   where it can and leaves validation to the backend.

use std::path::PathBuf;

pub mod diagnostics;
pub mod discovery;
pub mod source;

pub use discovery::{DiscoveredDeclaration, SynLocation, discover};
pub use source::{MAX_SOURCE_SIZE, SourceFile, collect_rust_files, module_path_for};

/// Error while reading or parsing host sources.
///
/// All variants are fatal for the pass.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is {size} bytes, larger than the {max} byte limit", path.display(), max = MAX_SOURCE_SIZE)]
    TooLarge { path: PathBuf, size: u64 },

    #[error("{path}:{line}:{column}: parse error: {message}")]
    Parse {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{path}:{line}:{column}: malformed #[{attribute}] attribute: {message}")]
    Attribute {
        path: String,
        line: usize,
        column: usize,
        attribute: String,
        message: String,
    },
}
