//! Provide the pure, value-comparable model behind `stringify-gen`.
//!
//! Everything in this crate is a plain value: no IO, no global state and no handles into a host's syntax tree. The
//! generator builds these values once per pass, and an incremental driver can compare them across passes to skip work
//! whose inputs did not change.
//!
//! ## Notes
//!
//! - [`location`] detaches a source position from the host into a [`LocationSnapshot`].
//! - [`equatable`] provides [`EquatableVec`], an ordered sequence with structural equality and hashing.
//! - [`model`] holds the per-member [`FormattingTarget`] and the per-type [`TypeGroup`].
//! - [`policy`] is the closed registry of formatting policies selected by an option code.
//! - [`diagnostics`] defines the `GEN_01` descriptor and the [`Diagnostic`] record.
//! - [`extract`] turns one annotated declaration into a [`FormattingTarget`].
//!
//! ## Examples
//! ```rust
//! use stringify_core::{EquatableVec, FormattingPolicy};
//!
//! assert_eq!(FormattingPolicy::from_code(1), Some(FormattingPolicy::RoundToEvenTo4Decimals));
//! assert_eq!(FormattingPolicy::from_code(7), None);
//!
//! let a: EquatableVec<u8> = [1, 2].into_iter().collect();
//! let b: EquatableVec<u8> = vec![1, 2].into();
//! assert_eq!(a, b);
//! ```

pub mod diagnostics;
pub mod equatable;
pub mod extract;
pub mod location;
pub mod model;
pub mod policy;

pub use diagnostics::{Diagnostic, DiagnosticDescriptor, Severity, UNSUPPORTED_OPTION};
pub use equatable::EquatableVec;
pub use extract::{AttributeArgument, AttributeData, DeclarationContext, ExtractError, extract};
pub use location::{ByteSpan, LinePosition, LineSpan, LiveLocation, LocationSnapshot, ReportLocation};
pub use model::{FormattingTarget, TypeGroup};
pub use policy::{FormattingPolicy, POLICIES, PolicyInfo};
