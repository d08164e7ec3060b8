//! End-to-end generation: sources → discovery → extraction → grouping → emission.
//!
//! [`Pipeline`] owns an [`IncrementalEmitter`], so a long-lived pipeline re-emits only the type groups whose targets
//! changed since the previous pass. Diagnostics are returned with the source text of every file that was read, so a
//! caller can render them with context after the declarations themselves are gone.

use std::collections::BTreeMap;
use std::path::Path;

use stringify_core::{Diagnostic, ExtractError, FormattingTarget, extract};

use crate::backend::{EmitError, GenerationOutput, IncrementalEmitter, PassStats};
use crate::config::GeneratorConfig;
use crate::frontend::{DiscoveryError, SourceFile, collect_rust_files, discover};

/// Error that aborts a generation pass.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("emission failed: {0}")]
    Emit(#[from] EmitError),
}

/// Result of one pass.
#[derive(Debug, Clone)]
pub struct PassResult {
    /// Every target extracted in this pass, in discovery order
    pub targets: Vec<FormattingTarget>,
    pub output: GenerationOutput,
    pub stats: PassStats,
    sources: BTreeMap<String, String>,
}

impl PassResult {
    /// Text of the source file at `path`, if it was part of the pass.
    pub fn source_text(&self, path: &str) -> Option<&str> {
        self.sources.get(path).map(String::as_str)
    }

    /// Source text a diagnostic points into.
    pub fn source_for(&self, diagnostic: &Diagnostic) -> Option<&str> {
        diagnostic
            .location
            .as_ref()
            .and_then(|location| self.source_text(&location.file_path))
    }

    pub fn has_errors(&self) -> bool {
        self.output.has_errors()
    }
}

/// Generation pipeline over Rust sources.
#[derive(Debug, Default)]
pub struct Pipeline {
    emitter: IncrementalEmitter,
}

impl Pipeline {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            emitter: IncrementalEmitter::new(config),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.emitter.config()
    }

    /// Discover and extract every annotated declaration in `sources`.
    ///
    /// ## Errors
    ///
    /// Fails on the first source that does not parse or the first declaration that breaks the extraction contract.
    #[tracing::instrument(skip_all, fields(source_count = sources.len()))]
    pub fn extract_targets(&self, sources: &[SourceFile]) -> Result<Vec<FormattingTarget>, PipelineError> {
        let attribute = &self.config().attribute_name;
        let mut targets = Vec::new();
        for source in sources {
            for declaration in discover(source, attribute)? {
                targets.push(extract(&declaration)?);
            }
        }
        Ok(targets)
    }

    /// Run one full pass over `sources`.
    #[tracing::instrument(skip_all, fields(source_count = sources.len()))]
    pub fn run(&mut self, sources: &[SourceFile]) -> Result<PassResult, PipelineError> {
        let targets = self.extract_targets(sources)?;
        let (output, stats) = self.emitter.run(targets.clone())?;

        let sources = sources
            .iter()
            .filter_map(|source| source.path.clone().map(|path| (path, source.text.clone())))
            .collect();

        tracing::debug!(
            targets = targets.len(),
            artifacts = output.groups.len(),
            diagnostics = output.diagnostics().count(),
            "generation pass complete"
        );
        Ok(PassResult {
            targets,
            output,
            stats,
            sources,
        })
    }

    /// Read `path` (a file or a directory) and run a pass over every Rust file in it.
    ///
    /// Module paths are derived relative to `crate_root`; when absent, `path` itself (or its parent directory for a
    /// single file) is taken as the crate source root.
    pub fn run_path(&mut self, path: &Path, crate_root: Option<&Path>) -> Result<PassResult, PipelineError> {
        let sources = load_sources(path, crate_root)?;
        self.run(&sources)
    }
}

/// Read every Rust file under `path`.
pub fn load_sources(path: &Path, crate_root: Option<&Path>) -> Result<Vec<SourceFile>, DiscoveryError> {
    let root = match crate_root {
        Some(root) => root.to_path_buf(),
        None if path.is_dir() => path.to_path_buf(),
        None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    collect_rust_files(path)
        .iter()
        .map(|file| SourceFile::read(&root, file))
        .collect()
}
