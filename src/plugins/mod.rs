//! Plugin discovery and documentation import.
//!
//! Each immediate subdirectory of the plugins directory is a plugin. A
//! plugin may carry a conventional docs subdirectory; whether it does is a
//! typed capability, probed once during discovery. Import copies every
//! present docs tree under the generated-sources area and writes a catalog
//! page linking the imported fragments.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{ImportError, Result};

// ============================================================================
// Discovery
// ============================================================================

/// Whether a plugin ships documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsCapability {
    /// The plugin has a docs directory at the contained path
    Present(PathBuf),
    /// The plugin ships no documentation
    Absent,
}

impl DocsCapability {
    /// The docs path, when present.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Present(path) => Some(path),
            Self::Absent => None,
        }
    }

    /// True when the plugin ships documentation.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// An installed plugin.
#[derive(Debug, Clone)]
pub struct Plugin {
    /// Directory name of the plugin
    pub name: String,
    /// Absolute path to the plugin directory
    pub path: PathBuf,
    /// Documentation capability, probed at discovery time
    pub docs: DocsCapability,
}

/// Discovers installed plugins.
///
/// Each immediate subdirectory of `plugins_dir` is a plugin; hidden
/// directories are ignored. The result is sorted by name so downstream
/// output is deterministic. A missing plugins directory yields an empty
/// list rather than an error, since a bare checkout has no plugins yet.
///
/// # Errors
///
/// Returns an error if the plugins directory exists but cannot be read.
pub fn discover(plugins_dir: &Path, docs_subdir: &str) -> Result<Vec<Plugin>> {
    if !plugins_dir.is_dir() {
        info!(path = %plugins_dir.display(), "plugins directory not present");
        return Ok(Vec::new());
    }

    let mut plugins = Vec::new();
    for entry in std::fs::read_dir(plugins_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let docs_dir = path.join(docs_subdir);
        let docs = if docs_dir.is_dir() {
            DocsCapability::Present(docs_dir)
        } else {
            DocsCapability::Absent
        };

        plugins.push(Plugin { name, path, docs });
    }

    plugins.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(plugins)
}

// ============================================================================
// Import
// ============================================================================

/// Outcome of a documentation import run.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Plugins whose docs were imported, in import order
    pub imported: Vec<String>,
    /// Plugins skipped because they ship no docs
    pub skipped: Vec<String>,
    /// Total number of files copied
    pub files_copied: usize,
}

/// Imports every present docs tree under `dest_root`.
///
/// For each plugin with docs, the per-plugin destination subtree is
/// removed first and then recreated from the source, so repeated imports
/// converge on the same file set even when source files were deleted in
/// between. Plugins without docs are skipped and recorded, never an
/// error. Finishes by writing the `index.md` catalog page.
///
/// # Errors
///
/// Returns an error when a destination subtree cannot be cleared or a
/// copy fails.
pub fn import_docs(plugins: &[Plugin], dest_root: &Path) -> Result<ImportReport> {
    std::fs::create_dir_all(dest_root)?;

    let mut report = ImportReport::default();
    for plugin in plugins {
        match &plugin.docs {
            DocsCapability::Absent => {
                info!(plugin = %plugin.name, "no docs directory, skipping");
                report.skipped.push(plugin.name.clone());
            }
            DocsCapability::Present(src) => {
                // A docs source that contains the destination would be
                // copied into itself endlessly
                if dest_root.starts_with(src) {
                    warn!(
                        plugin = %plugin.name,
                        "docs source contains the import destination, skipping"
                    );
                    report.skipped.push(plugin.name.clone());
                    continue;
                }

                let dest = dest_root.join(&plugin.name);
                if dest.exists() {
                    std::fs::remove_dir_all(&dest).map_err(|e| ImportError::CleanFailed {
                        path: dest.clone(),
                        source: e,
                    })?;
                }

                let copied =
                    copy_dir_recursive(src, &dest).map_err(|e| ImportError::CopyFailed {
                        plugin: plugin.name.clone(),
                        path: src.clone(),
                        source: e,
                    })?;

                debug!(plugin = %plugin.name, files = copied, "imported plugin docs");
                report.imported.push(plugin.name.clone());
                report.files_copied += copied;
            }
        }
    }

    let index = generate_index_page(&report);
    std::fs::write(dest_root.join("index.md"), index)?;

    info!(
        imported = report.imported.len(),
        skipped = report.skipped.len(),
        files = report.files_copied,
        "plugin docs import complete"
    );
    Ok(report)
}

/// Copies a directory tree, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    std::fs::create_dir_all(dst)?;

    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(std::io::Error::other)?;
        let src_path = entry.path();
        let Ok(relative) = src_path.strip_prefix(src) else {
            continue;
        };
        let dst_path = dst.join(relative);

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
        } else if src_path.is_file() {
            if let Some(parent) = dst_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(src_path, &dst_path)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Generates the plugin catalog page linking imported doc fragments.
fn generate_index_page(report: &ImportReport) -> String {
    let mut lines = Vec::new();

    lines.push("<!-- AUTO-GENERATED - DO NOT EDIT -->".to_string());
    lines.push(String::new());
    lines.push("# Plugin Documentation".to_string());
    lines.push(String::new());

    if report.imported.is_empty() {
        lines.push("No plugin documentation is installed.".to_string());
    } else {
        lines.push("| Plugin | Documentation |".to_string());
        lines.push("|--------|---------------|".to_string());
        for name in &report.imported {
            lines.push(format!("| {name} | [{name}/]({name}/) |"));
        }
    }

    lines.push(String::new());
    if !report.skipped.is_empty() {
        lines.push(format!(
            "Plugins without bundled docs: {}.",
            report.skipped.join(", ")
        ));
        lines.push(String::new());
    }

    lines.join("\n")
}

// ============================================================================
// Tests
// ============================================================================
