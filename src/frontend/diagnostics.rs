//! Render generator diagnostics for humans.
//!
//! Diagnostics carry a detached location; when the source text of that file is still around, the report shows the
//! annotated field with a label, otherwise just the code, message and location.

use miette::{GraphicalReportHandler, GraphicalTheme, NamedSource, Report};
use stringify_core::Diagnostic;

/// Render `diagnostic` with `miette`'s graphical handler.
///
/// `source_text` is the full text of the file the diagnostic points into, if available.
pub fn render(diagnostic: &Diagnostic, source_text: Option<&str>, color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);

    let report = match (&diagnostic.location, source_text) {
        (Some(location), Some(text)) => Report::new(diagnostic.clone())
            .with_source_code(NamedSource::new(location.file_path.clone(), text.to_string())),
        _ => Report::new(diagnostic.clone()),
    };

    let mut out = String::new();
    if handler.render_report(&mut out, &*report).is_err() {
        // Fall back to the one-line form rather than dropping the diagnostic.
        return summary(diagnostic);
    }
    if diagnostic.location.is_some() && source_text.is_none() {
        out.push_str(&format!("  --> {}\n", location_text(diagnostic)));
    }
    out
}

/// One-line form: `error[GEN_01]: The enum value 7 is not supported (src/lib.rs:3:5)`.
pub fn summary(diagnostic: &Diagnostic) -> String {
    let mut line = format!("{}[{}]: {}", diagnostic.severity(), diagnostic.code(), diagnostic.message);
    if diagnostic.location.is_some() {
        line.push_str(&format!(" ({})", location_text(diagnostic)));
    }
    line
}

fn location_text(diagnostic: &Diagnostic) -> String {
    diagnostic
        .location
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}
