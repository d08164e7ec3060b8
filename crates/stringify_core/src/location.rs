//! Detached source locations.
//!
//! A host hands the generator live location handles that point into its own (possibly transient) syntax tree. Those
//! handles must not outlive the extraction step, so they are copied into a [`LocationSnapshot`]: a plain value holding
//! the file path, the byte span and the line/column span.
//!
//! ## Notes
//!
//! - Line and character positions are 0-based, as stored. [`LocationSnapshot`]'s `Display` adds 1 for humans.
//! - Declarations with no backing source text (synthesized or in-memory nodes) have no snapshot. That is a normal
//!   outcome, not an error.

use std::fmt;

use miette::SourceSpan;

/// Half-open byte range `[start, end)` into a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A 0-based line and character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LinePosition {
    pub line: usize,
    pub character: usize,
}

impl LinePosition {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// Start and end [`LinePosition`] of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineSpan {
    pub start: LinePosition,
    pub end: LinePosition,
}

impl LineSpan {
    pub fn new(start: LinePosition, end: LinePosition) -> Self {
        Self { start, end }
    }
}

/// A live location handle owned by the host.
///
/// Implementations usually borrow from the host's syntax tree; the generator only reads them while extracting.
pub trait LiveLocation {
    /// Path of the source text backing this location, or `None` when there is no source text.
    fn source_path(&self) -> Option<&str>;

    fn byte_span(&self) -> ByteSpan;

    fn line_span(&self) -> LineSpan;
}

/// A source location detached from any host handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationSnapshot {
    pub file_path: String,
    pub byte_span: ByteSpan,
    pub line_span: LineSpan,
}

impl LocationSnapshot {
    pub fn new(file_path: impl Into<String>, byte_span: ByteSpan, line_span: LineSpan) -> Self {
        Self {
            file_path: file_path.into(),
            byte_span,
            line_span,
        }
    }

    /// Snapshot a live location.
    ///
    /// Returns `None` when the handle has no backing source text.
    pub fn from_live(location: &impl LiveLocation) -> Option<Self> {
        let path = location.source_path()?;
        Some(Self::new(path, location.byte_span(), location.line_span()))
    }

    /// Rebuild a reportable location from the stored path and spans.
    pub fn to_live_location(&self) -> ReportLocation {
        ReportLocation {
            file_path: self.file_path.clone(),
            span: SourceSpan::new(self.byte_span.start.into(), self.byte_span.len()),
            line_span: self.line_span,
        }
    }
}

impl fmt::Display for LocationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path,
            self.line_span.start.line + 1,
            self.line_span.start.character + 1
        )
    }
}

/// A location a diagnostic sink can report against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLocation {
    pub file_path: String,
    pub span: SourceSpan,
    pub line_span: LineSpan,
}

impl LiveLocation for ReportLocation {
    fn source_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }

    fn byte_span(&self) -> ByteSpan {
        ByteSpan::new(self.span.offset(), self.span.offset() + self.span.len())
    }

    fn line_span(&self) -> LineSpan {
        self.line_span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Synthesized;

    impl LiveLocation for Synthesized {
        fn source_path(&self) -> Option<&str> {
            None
        }

        fn byte_span(&self) -> ByteSpan {
            ByteSpan::default()
        }

        fn line_span(&self) -> LineSpan {
            LineSpan::default()
        }
    }

    fn sample() -> LocationSnapshot {
        LocationSnapshot::new(
            "src/shop/price.rs",
            ByteSpan::new(40, 72),
            LineSpan::new(LinePosition::new(3, 4), LinePosition::new(4, 23)),
        )
    }

    #[test]
    fn test_synthesized_location_has_no_snapshot() {
        assert_eq!(LocationSnapshot::from_live(&Synthesized), None);
    }

    #[test]
    fn test_round_trip_through_report_location() {
        let snapshot = sample();
        let live = snapshot.to_live_location();
        assert_eq!(live.span.offset(), 40);
        assert_eq!(live.span.len(), 32);
        assert_eq!(LocationSnapshot::from_live(&live), Some(snapshot));
    }

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(sample().to_string(), "src/shop/price.rs:4:5");
    }

    #[test]
    fn test_snapshots_compare_by_value() {
        let mut moved = sample();
        assert_eq!(moved, sample());
        moved.byte_span = ByteSpan::new(41, 72);
        assert_ne!(moved, sample());
    }

    #[test]
    fn test_byte_span_len_saturates() {
        assert_eq!(ByteSpan::new(10, 4).len(), 0);
        assert!(ByteSpan::new(3, 3).is_empty());
    }
}
