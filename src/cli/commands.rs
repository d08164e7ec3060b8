//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::collections::BTreeSet;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use stringify_core::FormattingTarget;

use crate::backend::GeneratedArtifact;
use crate::config::{ARTIFACT_SUFFIX, GeneratorConfig};
use crate::frontend::{collect_rust_files, diagnostics};
use crate::pipeline::{PassResult, Pipeline, load_sources};

use super::{CliError, CliResult, ExitCode};

/// Where `generate` puts its artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Write artifacts to the output directory and prune stale ones
    Write,
    /// Compare the output directory with what would be written
    Check,
    /// Print artifacts to stdout
    Stdout,
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub crate_root: Option<PathBuf>,
    pub mode: OutputMode,
}

// ============================================================================
// generate
// ============================================================================

/// Generate accessor artifacts for every annotated field under `path`.
///
/// Exits with failure when any diagnostic is an error, or when `--check` finds the output directory out of date.
pub fn generate(path: &Path, config: GeneratorConfig, options: &GenerateOptions) -> CliResult<ExitCode> {
    ensure_sources(path)?;
    if options.mode != OutputMode::Stdout {
        validate_output_dir(&config.out_dir)?;
    }

    let out_dir = config.out_dir.clone();
    let mut pipeline = Pipeline::new(config);
    let result = pipeline.run_path(path, options.crate_root.as_deref())?;

    report_diagnostics(&result);
    let artifacts: Vec<&GeneratedArtifact> = result.output.artifacts().collect();

    let up_to_date = match options.mode {
        OutputMode::Write => {
            write_artifacts(&out_dir, &artifacts)?;
            true
        }
        OutputMode::Check => check_artifacts(&out_dir, &artifacts)?,
        OutputMode::Stdout => {
            for artifact in &artifacts {
                println!("// ---- {} ----", artifact.name);
                print!("{}", artifact.source);
            }
            true
        }
    };

    let error_count = result.output.diagnostics().filter(|d| d.is_error()).count();
    if options.mode != OutputMode::Stdout {
        println!(
            "{} field(s), {} artifact(s), {} error(s)",
            result.targets.len(),
            artifacts.len(),
            error_count
        );
    }

    if error_count > 0 || !up_to_date {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn report_diagnostics(result: &PassResult) {
    let color = std::io::stderr().is_terminal();
    for diagnostic in result.output.diagnostics() {
        eprintln!("{}", diagnostics::render(diagnostic, result.source_for(diagnostic), color));
    }
}

/// Write `artifacts` to `out_dir`, skipping unchanged files and removing artifacts no longer produced.
fn write_artifacts(out_dir: &Path, artifacts: &[&GeneratedArtifact]) -> CliResult<()> {
    fs::create_dir_all(out_dir)
        .map_err(|e| CliError::failure(format!("Error creating {}: {}", out_dir.display(), e)))?;

    for artifact in artifacts {
        let target = out_dir.join(&artifact.name);
        if fs::read_to_string(&target).is_ok_and(|existing| existing == artifact.source) {
            tracing::debug!(artifact = %artifact.name, "artifact unchanged");
            continue;
        }
        fs::write(&target, &artifact.source)
            .map_err(|e| CliError::failure(format!("Error writing {}: {}", target.display(), e)))?;
        tracing::info!(path = %target.display(), "wrote artifact");
    }

    for stale in orphaned_artifacts(out_dir, artifacts) {
        fs::remove_file(&stale)
            .map_err(|e| CliError::failure(format!("Error removing {}: {}", stale.display(), e)))?;
        tracing::info!(path = %stale.display(), "removed stale artifact");
    }
    Ok(())
}

/// Report artifacts that are missing, differ, or should no longer exist. Returns whether `out_dir` is up to date.
fn check_artifacts(out_dir: &Path, artifacts: &[&GeneratedArtifact]) -> CliResult<bool> {
    let mut up_to_date = true;
    for artifact in artifacts {
        let target = out_dir.join(&artifact.name);
        match fs::read_to_string(&target) {
            Ok(existing) if existing == artifact.source => {}
            Ok(_) => {
                println!("Out of date: {}", target.display());
                up_to_date = false;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                println!("Missing: {}", target.display());
                up_to_date = false;
            }
            Err(e) => return Err(CliError::failure(format!("Error reading {}: {}", target.display(), e))),
        }
    }
    for stale in orphaned_artifacts(out_dir, artifacts) {
        println!("Stale: {}", stale.display());
        up_to_date = false;
    }
    Ok(up_to_date)
}

/// Artifact files in `out_dir` that this pass did not produce.
fn orphaned_artifacts(out_dir: &Path, artifacts: &[&GeneratedArtifact]) -> Vec<PathBuf> {
    let produced: BTreeSet<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
    let Ok(entries) = fs::read_dir(out_dir) else {
        return Vec::new();
    };
    let mut orphans: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.ends_with(ARTIFACT_SUFFIX) && !produced.contains(name))
        })
        .collect();
    orphans.sort();
    orphans
}

/// Validate output directory path for safety.
///
/// Rejects paths that traverse upward (`..`). Absolute paths are allowed with a warning.
fn validate_output_dir(out_dir: &Path) -> CliResult<()> {
    for component in out_dir.components() {
        if let std::path::Component::ParentDir = component {
            return Err(CliError::failure(format!(
                "Output directory '{}' contains path traversal (..)",
                out_dir.display()
            )));
        }
    }

    // Warn about absolute paths (but allow them for flexibility)
    if out_dir.is_absolute() {
        tracing::warn!(
            "Using absolute output path: {}. Consider using a relative path.",
            out_dir.display()
        );
    }

    Ok(())
}

fn ensure_sources(path: &Path) -> CliResult<()> {
    if !path.exists() {
        return Err(CliError::failure(format!("Error: {} does not exist", path.display())));
    }
    if collect_rust_files(path).is_empty() {
        return Err(CliError::failure(format!("No .rs files found in {}", path.display())));
    }
    Ok(())
}

// ============================================================================
// scan
// ============================================================================

/// List annotated fields with their resolved policy.
///
/// Fields with an unsupported option are listed too; the command then exits with failure.
pub fn scan(path: &Path, crate_root: Option<&Path>, config: GeneratorConfig, json: bool) -> CliResult<ExitCode> {
    ensure_sources(path)?;
    let sources = load_sources(path, crate_root).map_err(|e| CliError::failure(format!("Error: {e}")))?;
    let pipeline = Pipeline::new(config);
    let targets = pipeline.extract_targets(&sources)?;

    if json {
        let entries: Vec<serde_json::Value> = targets.iter().map(target_json).collect();
        let text = serde_json::to_string_pretty(&entries)
            .map_err(|e| CliError::failure(format!("Error serializing scan output: {e}")))?;
        println!("{text}");
    } else {
        for target in &targets {
            println!("{}", target_line(target));
        }
        println!("{} field(s)", targets.len());
    }

    if targets.iter().any(|t| t.policy().is_none()) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn qualified_type(target: &FormattingTarget) -> String {
    match &target.namespace {
        Some(ns) => format!("{ns}::{}", target.type_name),
        None => target.type_name.clone(),
    }
}

fn policy_label(target: &FormattingTarget) -> String {
    match target.policy() {
        Some(policy) => format!("{} ({})", policy.info().canonical, policy.info().description),
        None => format!("unsupported ({})", target.option_code),
    }
}

fn target_line(target: &FormattingTarget) -> String {
    let mut line = format!(
        "{}.{}: {}",
        qualified_type(target),
        target.member_name,
        policy_label(target)
    );
    if let Some(location) = &target.location {
        line.push_str(&format!("  [{location}]"));
    }
    line
}

fn target_json(target: &FormattingTarget) -> serde_json::Value {
    serde_json::json!({
        "namespace": target.namespace,
        "type": target.type_name,
        "member": target.member_name,
        "option": target.option_code,
        "policy": target.policy().map(|p| p.info().canonical),
        "description": target.policy().map(|p| p.info().description),
        "location": target.location.as_ref().map(ToString::to_string),
    })
}
