//! Diagnostic descriptors and records.
//!
//! Diagnostics are values: the emitter collects them next to the artifacts it produced and the host decides how to
//! surface them. [`Diagnostic`] implements [`miette::Diagnostic`] so a host can render it with source context.

use std::fmt;

use crate::location::LocationSnapshot;

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Static description of a diagnostic kind.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct DiagnosticDescriptor {
    pub code: &'static str,
    pub title: &'static str,
    /// Message with positional `{0}`, `{1}`, ... placeholders.
    pub message_template: &'static str,
    pub category: &'static str,
    pub severity: Severity,
}

impl DiagnosticDescriptor {
    /// Substitute positional placeholders in the message template.
    pub fn format_message(&self, args: &[&dyn fmt::Display]) -> String {
        let mut message = self.message_template.to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), &arg.to_string());
        }
        message
    }
}

/// `GEN_01`: the attribute's option code names no formatting policy.
pub static UNSUPPORTED_OPTION: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "GEN_01",
    title: "Unsupported Enum value",
    message_template: "The enum value {0} is not supported",
    category: "Generation",
    severity: Severity::Error,
};

/// A reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub descriptor: &'static DiagnosticDescriptor,
    pub message: String,
    pub location: Option<LocationSnapshot>,
}

impl Diagnostic {
    pub fn new(
        descriptor: &'static DiagnosticDescriptor,
        location: Option<LocationSnapshot>,
        args: &[&dyn fmt::Display],
    ) -> Self {
        Self {
            descriptor,
            message: descriptor.format_message(args),
            location,
        }
    }

    /// `GEN_01` for an option code outside the policy registry.
    pub fn unsupported_option(option_code: i32, location: Option<LocationSnapshot>) -> Self {
        Self::new(&UNSUPPORTED_OPTION, location, &[&option_code])
    }

    pub fn code(&self) -> &'static str {
        self.descriptor.code
    }

    pub fn severity(&self) -> Severity {
        self.descriptor.severity
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl miette::Diagnostic for Diagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.descriptor.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.descriptor.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("supported options: 0 (Out4), 1 (Even4)"))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let location = self.location.as_ref()?.to_live_location();
        Some(Box::new(std::iter::once(miette::LabeledSpan::new_with_span(
            Some(self.descriptor.title.to_string()),
            location.span,
        ))))
    }
}
