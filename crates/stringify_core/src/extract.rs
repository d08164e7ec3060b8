//! Extraction transform: one annotated declaration in, one [`FormattingTarget`] out.
//!
//! The host discovery mechanism is expected to hand over only named members carrying exactly one formatting
//! attribute with exactly one integer argument. [`extract`] does not try to recover when that contract is broken: it
//! returns an [`ExtractError`] and the caller fails the pass.
//!
//! ## Notes
//!
//! - [`extract`] is pure. It reads the context, copies what it needs into owned values and keeps no handle, so it can
//!   run in parallel over disjoint declarations.

use crate::location::{LiveLocation, LocationSnapshot};
use crate::model::FormattingTarget;

/// A constructor argument of the formatting attribute, as converted by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeArgument {
    Integer(i64),
    /// Anything the host could not convert to an integer; kept as source text for the error message.
    Other(String),
}

/// One occurrence of the formatting attribute on a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeData {
    pub constructor_arguments: Vec<AttributeArgument>,
}

impl AttributeData {
    pub fn new(constructor_arguments: Vec<AttributeArgument>) -> Self {
        Self { constructor_arguments }
    }
}

/// An annotated declaration as seen by the host.
pub trait DeclarationContext {
    type Location<'a>: LiveLocation
    where
        Self: 'a;

    /// Module path of the declaring type, `None` at the crate root.
    fn containing_namespace(&self) -> Option<String>;

    fn containing_type(&self) -> Option<&str>;

    fn member_name(&self) -> Option<&str>;

    /// Every occurrence of the formatting attribute on the member.
    fn attributes(&self) -> &[AttributeData];

    fn location(&self) -> Self::Location<'_>;
}

/// The host handed over a declaration that breaks the extraction contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("member `{member}` carries {count} formatting attributes, expected exactly one")]
    AttributeCount { member: String, count: usize },

    #[error("formatting attribute on `{member}` has {count} arguments, expected exactly one")]
    ArgumentCount { member: String, count: usize },

    #[error("formatting attribute on `{member}` has a non-integer argument `{argument}`")]
    NonIntegerArgument { member: String, argument: String },

    #[error("annotated member has no name")]
    MissingMemberName,

    #[error("member `{member}` has no containing type")]
    MissingContainingType { member: String },
}

/// Extract the flat model of one annotated declaration.
pub fn extract(context: &impl DeclarationContext) -> Result<FormattingTarget, ExtractError> {
    let member_name = context.member_name().ok_or(ExtractError::MissingMemberName)?.to_string();
    let type_name = context
        .containing_type()
        .ok_or_else(|| ExtractError::MissingContainingType {
            member: member_name.clone(),
        })?
        .to_string();

    let option_code = single_option_code(&member_name, context.attributes())?;
    let location = LocationSnapshot::from_live(&context.location());

    tracing::trace!(member = %member_name, type_name = %type_name, option_code, "extracted formatting target");

    Ok(FormattingTarget {
        namespace: context.containing_namespace(),
        type_name,
        member_name,
        option_code,
        location,
    })
}

fn single_option_code(member: &str, attributes: &[AttributeData]) -> Result<i32, ExtractError> {
    let [attribute] = attributes else {
        return Err(ExtractError::AttributeCount {
            member: member.to_string(),
            count: attributes.len(),
        });
    };
    let [argument] = attribute.constructor_arguments.as_slice() else {
        return Err(ExtractError::ArgumentCount {
            member: member.to_string(),
            count: attribute.constructor_arguments.len(),
        });
    };
    match argument {
        AttributeArgument::Integer(value) => {
            i32::try_from(*value).map_err(|_| ExtractError::NonIntegerArgument {
                member: member.to_string(),
                argument: value.to_string(),
            })
        }
        AttributeArgument::Other(text) => Err(ExtractError::NonIntegerArgument {
            member: member.to_string(),
            argument: text.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{ByteSpan, LinePosition, LineSpan, ReportLocation};

    struct Decl {
        namespace: Option<&'static str>,
        type_name: Option<&'static str>,
        member: Option<&'static str>,
        attributes: Vec<AttributeData>,
        location: Option<ReportLocation>,
    }

    struct MaybeLocation<'a>(Option<&'a ReportLocation>);

    impl LiveLocation for MaybeLocation<'_> {
        fn source_path(&self) -> Option<&str> {
            self.0.map(|l| l.file_path.as_str())
        }

        fn byte_span(&self) -> ByteSpan {
            self.0.map(|l| l.byte_span()).unwrap_or_default()
        }

        fn line_span(&self) -> LineSpan {
            self.0.map(|l| l.line_span).unwrap_or_default()
        }
    }

    impl DeclarationContext for Decl {
        type Location<'a> = MaybeLocation<'a>;

        fn containing_namespace(&self) -> Option<String> {
            self.namespace.map(str::to_string)
        }

        fn containing_type(&self) -> Option<&str> {
            self.type_name
        }

        fn member_name(&self) -> Option<&str> {
            self.member
        }

        fn attributes(&self) -> &[AttributeData] {
            &self.attributes
        }

        fn location(&self) -> MaybeLocation<'_> {
            MaybeLocation(self.location.as_ref())
        }
    }

    fn decl(args: Vec<AttributeArgument>) -> Decl {
        Decl {
            namespace: Some("shop"),
            type_name: Some("Price"),
            member: Some("amount"),
            attributes: vec![AttributeData::new(args)],
            location: Some(
                LocationSnapshot::new(
                    "src/shop.rs",
                    ByteSpan::new(5, 30),
                    LineSpan::new(LinePosition::new(2, 4), LinePosition::new(3, 20)),
                )
                .to_live_location(),
            ),
        }
    }

    #[test]
    fn test_extracts_all_fields() {
        let target = extract(&decl(vec![AttributeArgument::Integer(1)])).unwrap();
        assert_eq!(target.namespace.as_deref(), Some("shop"));
        assert_eq!(target.type_name, "Price");
        assert_eq!(target.member_name, "amount");
        assert_eq!(target.option_code, 1);
        let location = target.location.unwrap();
        assert_eq!(location.file_path, "src/shop.rs");
        assert_eq!(location.byte_span, ByteSpan::new(5, 30));
    }

    #[test]
    fn test_invalid_codes_are_extracted_unvalidated() {
        let target = extract(&decl(vec![AttributeArgument::Integer(7)])).unwrap();
        assert_eq!(target.option_code, 7);
    }

    #[test]
    fn test_missing_source_text_yields_no_location() {
        let mut d = decl(vec![AttributeArgument::Integer(0)]);
        d.location = None;
        assert_eq!(extract(&d).unwrap().location, None);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let d = decl(vec![AttributeArgument::Integer(0)]);
        assert_eq!(extract(&d).unwrap(), extract(&d).unwrap());
    }

    #[test]
    fn test_attribute_multiplicity_is_fatal() {
        let mut d = decl(vec![AttributeArgument::Integer(0)]);
        d.attributes.push(AttributeData::new(vec![AttributeArgument::Integer(1)]));
        assert_eq!(
            extract(&d),
            Err(ExtractError::AttributeCount {
                member: "amount".into(),
                count: 2
            })
        );

        d.attributes.clear();
        assert!(matches!(extract(&d), Err(ExtractError::AttributeCount { count: 0, .. })));
    }

    #[test]
    fn test_argument_count_is_fatal() {
        let d = decl(vec![AttributeArgument::Integer(0), AttributeArgument::Integer(1)]);
        assert!(matches!(extract(&d), Err(ExtractError::ArgumentCount { count: 2, .. })));
        let d = decl(Vec::new());
        assert!(matches!(extract(&d), Err(ExtractError::ArgumentCount { count: 0, .. })));
    }

    #[test]
    fn test_non_integer_arguments_are_fatal() {
        let d = decl(vec![AttributeArgument::Other("\"four\"".into())]);
        assert!(matches!(extract(&d), Err(ExtractError::NonIntegerArgument { .. })));
        let d = decl(vec![AttributeArgument::Integer(i64::from(i32::MAX) + 1)]);
        assert!(matches!(extract(&d), Err(ExtractError::NonIntegerArgument { .. })));
    }

    #[test]
    fn test_missing_structure_is_fatal() {
        let mut d = decl(vec![AttributeArgument::Integer(0)]);
        d.type_name = None;
        assert!(matches!(extract(&d), Err(ExtractError::MissingContainingType { .. })));
        d.member = None;
        assert_eq!(extract(&d), Err(ExtractError::MissingMemberName));
    }
}
