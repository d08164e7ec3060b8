#![forbid(unsafe_code)]
//! stringify-gen: formatted-string accessor generator for Rust structs
//!
//! Fields annotated with `#[stringify(<option>)]` get a generated `get_<field>_string` accessor that rounds the
//! field's `Decimal` value to four places with the selected strategy. This crate provides the host: discovery over
//! Rust sources (frontend), grouping and code generation (backend), the pipeline facade and the CLI. The IO-free
//! model and extraction transform live in `stringify_core`.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Invalid options**: An unsupported formatting option is a diagnostic, never an error or a panic. Only broken
//!   host contracts, unparsable sources and emitter failures abort a pass.

pub mod backend;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod pipeline;
pub mod version;

pub use backend::{GeneratedArtifact, GenerationOutput, IncrementalEmitter, emit, group_targets};
pub use config::GeneratorConfig;
pub use frontend::{SourceFile, discover};
pub use pipeline::{PassResult, Pipeline, PipelineError};

pub use stringify_core::{Diagnostic, FormattingPolicy, FormattingTarget, TypeGroup};
