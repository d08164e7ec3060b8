//! Emit accessor artifacts for grouped formatting targets.
//!
//! Each [`TypeGroup`] becomes one artifact holding an inherent `impl` block for the declaring type, with one
//! `get_<member>_string` accessor per member whose option code resolves to a [`FormattingPolicy`]. Members with an
//! unsupported code get a `GEN_01` diagnostic instead and the rest of the group is still emitted.
//!
//! ## Notes
//!
//! - Emission builds a token stream with `quote!`, parses it into a `syn::File` and formats it with `prettyplease`,
//!   so equal groups always produce byte-identical text.
//! - A type in a module is wrapped in `const _: () = { use crate::<module>::<Type>; ... };` so the artifact can be
//!   included anywhere in the crate. Crate-root types get a bare `impl` block.
//! - Nothing here writes files or prints diagnostics; the caller registers artifacts and surfaces diagnostics.

use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote};
use rust_decimal::RoundingStrategy;
use stringify_core::{Diagnostic, FormattingPolicy, FormattingTarget, TypeGroup};

use super::group::group_targets;
use crate::config::{ARTIFACT_SUFFIX, GeneratorConfig};
use crate::version::GENERATOR_VERSION;

/// Error during artifact emission.
///
/// These are fatal for the pass: they mean a name cannot be expressed in Rust or the emitter produced invalid tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("`{0}` is not a valid Rust identifier")]
    InvalidIdentifier(String),

    #[error("syn parse error: {0}")]
    SynParse(String),

    #[error("rounding strategy {0} has no generated form")]
    UnsupportedStrategy(String),
}

/// A named generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedArtifact {
    pub name: String,
    pub source: String,
}

/// The artifact and diagnostics produced for one type group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupOutput {
    pub artifact: GeneratedArtifact,
    pub diagnostics: Vec<Diagnostic>,
}

/// Everything one generation pass produced, in group order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    pub groups: Vec<GroupOutput>,
}

impl GenerationOutput {
    pub fn artifacts(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.groups.iter().map(|g| &g.artifact)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.groups.iter().flat_map(|g| &g.diagnostics)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics().any(Diagnostic::is_error)
    }
}

/// Group `targets` by declaring type and emit one artifact per group.
#[tracing::instrument(skip_all, fields(target_count = targets.len()))]
pub fn emit(targets: Vec<FormattingTarget>, config: &GeneratorConfig) -> Result<GenerationOutput, EmitError> {
    let groups = group_targets(targets)
        .iter()
        .map(|group| emit_group(group, config))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(GenerationOutput { groups })
}

/// Deterministic artifact name for a group, e.g. `shop.pricing.Price.generated.rs`.
pub fn artifact_name(group: &TypeGroup) -> String {
    let mut parts = group.namespace_segments();
    parts.push(&group.type_name);
    format!("{}.{}", parts.join("."), ARTIFACT_SUFFIX)
}

/// Accessor method name for a member: `get_<member>_string`.
pub fn accessor_name(member_name: &str) -> String {
    format!("get_{member_name}_string")
}

/// Emit the artifact for one group.
#[tracing::instrument(skip_all, fields(type_name = %group.type_name, member_count = group.members.len()))]
pub fn emit_group(group: &TypeGroup, config: &GeneratorConfig) -> Result<GroupOutput, EmitError> {
    let type_ident = rust_ident(&group.type_name)?;

    let mut accessors = Vec::new();
    let mut diagnostics = Vec::new();
    let mut has_non_snake_accessor = false;
    for member in &group.members {
        match member.policy() {
            Some(policy) => {
                accessors.push(emit_accessor(member, policy)?);
                has_non_snake_accessor |= member.member_name.chars().any(char::is_uppercase);
            }
            None => {
                tracing::debug!(
                    member = %member.member_name,
                    option_code = member.option_code,
                    "unsupported formatting option"
                );
                diagnostics.push(Diagnostic::unsupported_option(member.option_code, member.location.clone()));
            }
        }
    }

    let allow = if has_non_snake_accessor {
        quote! { #[allow(non_snake_case)] }
    } else {
        quote! {}
    };
    let impl_block = quote! {
        #allow
        impl #type_ident {
            #(#accessors)*
        }
    };

    let segments = group.namespace_segments();
    let tokens = if segments.is_empty() {
        impl_block
    } else {
        let module_path = segments.iter().map(|s| rust_ident(s)).collect::<Result<Vec<_>, _>>()?;
        quote! {
            const _: () = {
                use crate::#(#module_path)::*::#type_ident;
                #impl_block
            };
        }
    };

    let file: syn::File = syn::parse2(tokens).map_err(|e| EmitError::SynParse(e.to_string()))?;
    let formatted = prettyplease::unparse(&file);
    let source = if config.emit_header {
        format!("// Generated by stringify-gen v{GENERATOR_VERSION}. Do not edit.\n\n{formatted}")
    } else {
        formatted
    };

    Ok(GroupOutput {
        artifact: GeneratedArtifact {
            name: artifact_name(group),
            source,
        },
        diagnostics,
    })
}

/// Emit `get_<member>_string`, which rounds the field on every call.
fn emit_accessor(member: &FormattingTarget, policy: FormattingPolicy) -> Result<TokenStream, EmitError> {
    let field = rust_ident(&member.member_name)?;
    let accessor = rust_ident(&accessor_name(&member.member_name))?;
    let strategy = strategy_ident(policy.strategy())?;
    let decimals = Literal::u32_unsuffixed(policy.decimals());

    Ok(quote! {
        pub fn #accessor(&self) -> String {
            let strategy = ::rust_decimal::RoundingStrategy::#strategy;
            self.#field.round_dp_with_strategy(#decimals, strategy).to_string()
        }
    })
}

/// Variant name of `strategy` under `::rust_decimal::RoundingStrategy`.
///
/// Deprecated aliases have no stable spelling in generated code and are rejected.
fn strategy_ident(strategy: RoundingStrategy) -> Result<Ident, EmitError> {
    let name = match strategy {
        RoundingStrategy::MidpointNearestEven => "MidpointNearestEven",
        RoundingStrategy::MidpointAwayFromZero => "MidpointAwayFromZero",
        RoundingStrategy::MidpointTowardZero => "MidpointTowardZero",
        RoundingStrategy::ToZero => "ToZero",
        RoundingStrategy::AwayFromZero => "AwayFromZero",
        RoundingStrategy::ToNegativeInfinity => "ToNegativeInfinity",
        RoundingStrategy::ToPositiveInfinity => "ToPositiveInfinity",
        _ => return Err(EmitError::UnsupportedStrategy(format!("{strategy:?}"))),
    };
    Ok(format_ident!("{}", name))
}

/// Parse `name` as an identifier, falling back to a raw identifier for keywords (`type` → `r#type`).
fn rust_ident(name: &str) -> Result<Ident, EmitError> {
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .map_err(|_| EmitError::InvalidIdentifier(name.to_string()))
}
