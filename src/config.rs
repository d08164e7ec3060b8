//! Generator configuration.

use std::path::PathBuf;

/// Default attribute name recognised on struct fields.
pub const DEFAULT_ATTRIBUTE: &str = "stringify";

/// Default directory artifacts are written to.
pub const DEFAULT_OUT_DIR: &str = "target/stringify";

/// Suffix appended to every artifact name.
pub const ARTIFACT_SUFFIX: &str = "generated.rs";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Attribute marking a field for accessor generation (`#[stringify(..)]` by default)
    pub attribute_name: String,
    /// Directory generated artifacts are written to
    pub out_dir: PathBuf,
    /// Whether artifacts start with a "generated by" header comment
    pub emit_header: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            attribute_name: DEFAULT_ATTRIBUTE.to_string(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            emit_header: true,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attribute name
    pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
        self.attribute_name = name.into();
        self
    }

    /// Set the output directory
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Set whether the header comment is emitted
    pub fn with_header(mut self, emit_header: bool) -> Self {
        self.emit_header = emit_header;
        self
    }
}
