//! Source files and their position in the crate's module tree.

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::DiscoveryError;

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions during discovery.
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// A Rust source file handed to discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Display path; `None` for in-memory sources, which produce targets without a location.
    pub path: Option<String>,
    pub text: String,
    /// Module path of the file inside its crate (`["shop", "pricing"]` for `src/shop/pricing.rs`).
    pub module_path: Vec<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>, module_path: Vec<String>) -> Self {
        Self {
            path: Some(path.into()),
            text: text.into(),
            module_path,
        }
    }

    /// A source with no backing file, treated as the crate root module.
    pub fn in_memory(text: impl Into<String>) -> Self {
        Self {
            path: None,
            text: text.into(),
            module_path: Vec::new(),
        }
    }

    /// Read `path` and derive its module path relative to `crate_root`.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (I/O error)
    /// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
    pub fn read(crate_root: &Path, path: &Path) -> Result<Self, DiscoveryError> {
        let metadata = fs::metadata(path).map_err(|source| DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.len() > MAX_SOURCE_SIZE {
            return Err(DiscoveryError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
            });
        }
        let text = fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(
            path.display().to_string(),
            text,
            module_path_for(crate_root, path),
        ))
    }
}

/// Derive the module path of `file` relative to the crate source root.
///
/// `lib.rs`, `main.rs` and `mod.rs` name their directory's module; any other file adds its stem.
pub fn module_path_for(crate_root: &Path, file: &Path) -> Vec<String> {
    let relative = file.strip_prefix(crate_root).unwrap_or(file);
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str().map(str::to_string),
            _ => None,
        })
        .collect();

    let Some(last) = segments.pop() else {
        return segments;
    };
    let stem = Path::new(&last).file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let names_directory = matches!(stem, "mod" | "lib" | "main") || stem.is_empty();
    if !names_directory {
        segments.push(stem.to_string());
    }
    segments
}

/// Collect `.rs` files under `path`, sorted, skipping hidden and `target` directories.
pub fn collect_rust_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if path.is_file() {
        if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                let entry_path = entry.path();
                if entry_path.is_dir() {
                    let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                    if !name.starts_with('.') && name != "target" {
                        files.extend(collect_rust_files(&entry_path));
                    }
                } else if entry_path.extension().is_some_and(|ext| ext == "rs") {
                    files.push(entry_path);
                }
            }
        }
    }

    files.sort();
    files
}
