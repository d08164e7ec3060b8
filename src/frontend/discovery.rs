//! Find annotated struct fields in Rust sources.
//!
//! This is the host side of extraction: it walks a parsed `syn::File`, keeps named struct fields carrying the
//! formatting attribute and exposes each one as a [`DeclarationContext`]. Declarations borrow from the
//! [`SourceFile`]; [`stringify_core::extract`] copies what it needs out of them.
//!
//! ## Notes
//!
//! - Structs at module level and inside inline `mod name { .. }` blocks are visited. Items nested in function bodies,
//!   impl blocks and enum variants are not.
//! - Tuple struct fields have no name and are never annotated declarations.
//! - Attribute arguments are converted here: integer literals (optionally negated) become integers, and paths ending
//!   in a policy name (`Out4`, `Even4`) become that policy's code. Anything else is passed through as text and
//!   rejected by extraction.

use proc_macro2::Span;
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, Fields, Item, ItemStruct, Lit, Meta, Token, UnOp};

use stringify_core::{
    AttributeArgument, AttributeData, ByteSpan, DeclarationContext, FormattingPolicy, LinePosition, LineSpan,
    LiveLocation,
};

use super::DiscoveryError;
use super::source::SourceFile;

/// An annotated field found in a source file.
#[derive(Debug, Clone)]
pub struct DiscoveredDeclaration<'a> {
    source: &'a SourceFile,
    namespace: Vec<String>,
    type_name: String,
    member_name: Option<String>,
    attributes: Vec<AttributeData>,
    span: Span,
    prefix: SkippedPrefix,
}

/// Live location of a discovered declaration.
#[derive(Debug, Clone, Copy)]
pub struct SynLocation<'a> {
    path: Option<&'a str>,
    span: Span,
    prefix: SkippedPrefix,
}

/// Text `syn::parse_file` drops before lexing: a byte order mark and a shebang line.
///
/// Spans count from the end of this prefix; adding it back gives positions in [`SourceFile::text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SkippedPrefix {
    bytes: usize,
    /// Characters the prefix adds in front of the first line's columns
    first_line_chars: usize,
}

impl SkippedPrefix {
    fn of(text: &str) -> Self {
        let mut prefix = Self::default();
        let mut rest = text;
        if let Some(stripped) = rest.strip_prefix('\u{feff}') {
            prefix.bytes += '\u{feff}'.len_utf8();
            prefix.first_line_chars += 1;
            rest = stripped;
        }
        let is_shebang = rest
            .strip_prefix("#!")
            .is_some_and(|after| !after.trim_start().starts_with('['));
        if is_shebang {
            // The shebang line is removed up to, not including, its newline.
            let line_len = rest.find('\n').unwrap_or(rest.len());
            prefix.bytes += line_len;
            prefix.first_line_chars += rest[..line_len].chars().count();
        }
        prefix
    }
}

impl LiveLocation for SynLocation<'_> {
    fn source_path(&self) -> Option<&str> {
        // Line 0 marks a span with no source position (e.g. tokens built by `quote!`).
        if self.span.start().line == 0 {
            return None;
        }
        self.path
    }

    fn byte_span(&self) -> ByteSpan {
        let range = self.span.byte_range();
        ByteSpan::new(range.start + self.prefix.bytes, range.end + self.prefix.bytes)
    }

    fn line_span(&self) -> LineSpan {
        let position = |line: usize, column: usize| {
            let shift = if line == 1 { self.prefix.first_line_chars } else { 0 };
            LinePosition::new(line.saturating_sub(1), column + shift)
        };
        let start = self.span.start();
        let end = self.span.end();
        LineSpan::new(position(start.line, start.column), position(end.line, end.column))
    }
}

impl<'a> DeclarationContext for DiscoveredDeclaration<'a> {
    type Location<'b> = SynLocation<'b> where Self: 'b;

    fn containing_namespace(&self) -> Option<String> {
        if self.namespace.is_empty() {
            None
        } else {
            Some(self.namespace.join("::"))
        }
    }

    fn containing_type(&self) -> Option<&str> {
        Some(&self.type_name)
    }

    fn member_name(&self) -> Option<&str> {
        self.member_name.as_deref()
    }

    fn attributes(&self) -> &[AttributeData] {
        &self.attributes
    }

    fn location(&self) -> SynLocation<'_> {
        SynLocation {
            path: self.source.path.as_deref(),
            span: self.span,
            prefix: self.prefix,
        }
    }
}

/// Parse `source` and return every field annotated with `#[<attribute>(..)]`, in source order.
#[tracing::instrument(skip_all, fields(path = source.path.as_deref().unwrap_or("<memory>")))]
pub fn discover<'a>(source: &'a SourceFile, attribute: &str) -> Result<Vec<DiscoveredDeclaration<'a>>, DiscoveryError> {
    let file = syn::parse_file(&source.text).map_err(|e| {
        let start = e.span().start();
        DiscoveryError::Parse {
            path: display_path(source),
            line: start.line,
            column: start.column + 1,
            message: e.to_string(),
        }
    })?;

    let mut found = Vec::new();
    let mut walker = Walker {
        source,
        attribute,
        prefix: SkippedPrefix::of(&source.text),
        found: &mut found,
    };
    walker.visit_items(&file.items, &source.module_path)?;
    tracing::debug!(count = found.len(), "discovered annotated fields");
    Ok(found)
}

struct Walker<'s, 'o> {
    source: &'s SourceFile,
    attribute: &'o str,
    prefix: SkippedPrefix,
    found: &'o mut Vec<DiscoveredDeclaration<'s>>,
}

impl<'s> Walker<'s, '_> {
    fn visit_items(&mut self, items: &[Item], module: &[String]) -> Result<(), DiscoveryError> {
        for item in items {
            match item {
                Item::Struct(item_struct) => self.visit_struct(item_struct, module)?,
                Item::Mod(item_mod) => {
                    if let Some((_, content)) = &item_mod.content {
                        let mut nested = module.to_vec();
                        nested.push(item_mod.ident.unraw().to_string());
                        self.visit_items(content, &nested)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn visit_struct(&mut self, item: &ItemStruct, module: &[String]) -> Result<(), DiscoveryError> {
        let Fields::Named(fields) = &item.fields else {
            return Ok(());
        };
        for field in &fields.named {
            let occurrences: Vec<&Attribute> =
                field.attrs.iter().filter(|attr| attr.path().is_ident(self.attribute)).collect();
            if occurrences.is_empty() {
                continue;
            }
            let attributes = occurrences
                .into_iter()
                .map(|attr| self.attribute_data(attr))
                .collect::<Result<Vec<_>, _>>()?;

            self.found.push(DiscoveredDeclaration {
                source: self.source,
                namespace: module.to_vec(),
                type_name: item.ident.unraw().to_string(),
                member_name: field.ident.as_ref().map(|ident| ident.unraw().to_string()),
                attributes,
                span: field.span(),
                prefix: self.prefix,
            });
        }
        Ok(())
    }

    fn attribute_data(&self, attr: &Attribute) -> Result<AttributeData, DiscoveryError> {
        let arguments = match &attr.meta {
            Meta::Path(_) => Vec::new(),
            Meta::NameValue(name_value) => vec![convert_argument(&name_value.value)],
            Meta::List(_) => {
                let exprs = attr
                    .parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated)
                    .map_err(|e| {
                        let start = e.span().start();
                        DiscoveryError::Attribute {
                            path: display_path(self.source),
                            line: start.line,
                            column: start.column + 1,
                            attribute: self.attribute.to_string(),
                            message: e.to_string(),
                        }
                    })?;
                exprs.iter().map(convert_argument).collect()
            }
        };
        Ok(AttributeData::new(arguments))
    }
}

/// Convert an attribute argument to an integer where the host can.
fn convert_argument(expr: &Expr) -> AttributeArgument {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => int
                .base10_parse::<i64>()
                .map(AttributeArgument::Integer)
                .unwrap_or_else(|_| AttributeArgument::Other(int.to_string())),
            _ => AttributeArgument::Other(expr.to_token_stream().to_string()),
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match convert_argument(&unary.expr) {
            AttributeArgument::Integer(value) => AttributeArgument::Integer(-value),
            AttributeArgument::Other(_) => AttributeArgument::Other(expr.to_token_stream().to_string()),
        },
        Expr::Paren(paren) => convert_argument(&paren.expr),
        Expr::Path(path) => path
            .path
            .segments
            .last()
            .and_then(|segment| FormattingPolicy::from_name(&segment.ident.to_string()))
            .map(|policy| AttributeArgument::Integer(i64::from(policy.code())))
            .unwrap_or_else(|| AttributeArgument::Other(expr.to_token_stream().to_string())),
        _ => AttributeArgument::Other(expr.to_token_stream().to_string()),
    }
}

fn display_path(source: &SourceFile) -> String {
    source.path.clone().unwrap_or_else(|| "<memory>".to_string())
}
