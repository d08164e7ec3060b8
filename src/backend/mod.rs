//! stringify-gen backend
//!
//! This module turns extracted formatting targets into generated Rust source.
//!
//! The pipeline is:
//! 1. `FormattingTarget`s → `group` → one `TypeGroup` per declaring type, members sorted by name
//! 2. `TypeGroup` → `emit` (quote! → syn → prettyplease) → artifact text + `GEN_01` diagnostics
//! 3. Optionally, `incremental` memoizes step 2 across passes by group equality
//!
//! ## Module Organization
//!
//! - `group.rs` - Partition targets by `(namespace, type_name)`
//! - `emit.rs` - Accessor emission, artifact naming, emission errors
//! - `incremental.rs` - Cross-pass cache keyed by `TypeGroup`

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod emit;
pub mod group;
pub mod incremental;

pub use emit::{
    EmitError, GeneratedArtifact, GenerationOutput, GroupOutput, accessor_name, artifact_name, emit, emit_group,
};
pub use group::group_targets;
pub use incremental::{IncrementalEmitter, PassStats};
