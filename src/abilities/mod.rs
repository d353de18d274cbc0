//! Ability metadata discovery.
//!
//! Abilities live as YAML lists under each plugin's data directory
//! (`data/abilities` by convention). Discovery walks every plugin, parses
//! each file, and produces one flat, deterministically ordered set per
//! build. A file that fails to parse is recorded and skipped so one broken
//! plugin cannot take down the whole site build; strict callers turn the
//! skip list into a fatal error.

pub mod export;
pub mod validate;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::plugins::Plugin;

// ============================================================================
// Model
// ============================================================================

/// ATT&CK technique reference carried by an ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueRef {
    /// Technique ID, e.g. `T1059.003`
    pub attack_id: String,
    /// Technique name
    pub name: String,
}

/// A single ability record as stored in plugin data files.
///
/// Data files carry more fields (executors, platforms, requirements); only
/// the metadata the docs site needs is modeled here, the rest is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Unique ability ID (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description; absent in some older data files
    #[serde(default)]
    pub description: String,
    /// Tactic this ability serves
    pub tactic: String,
    /// Technique mapping
    pub technique: TechniqueRef,
}

/// An ability record tied to the plugin and file it came from.
#[derive(Debug, Clone)]
pub struct PluginAbility {
    /// Owning plugin name
    pub plugin: String,
    /// Source file the record was parsed from
    pub source: PathBuf,
    /// Position of the record within its file
    pub index: usize,
    /// The parsed record
    pub ability: Ability,
}

/// A source file skipped during discovery.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    /// Path of the file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Everything discovery found in one pass over the plugin tree.
#[derive(Debug, Clone, Default)]
pub struct AbilitySet {
    /// Parsed records in deterministic (plugin, file, index) order
    pub abilities: Vec<PluginAbility>,
    /// Files that could not be read or parsed
    pub skipped: Vec<SkippedFile>,
}

impl AbilitySet {
    /// Number of parsed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    /// True when discovery found no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

// ============================================================================
// Discovery
// ============================================================================

/// Collects every ability record under the given plugins.
///
/// Files are visited in sorted path order per plugin, so repeated runs over
/// the same tree enumerate records identically. Unreadable or unparseable
/// files are skipped with a warning and recorded in the result.
///
/// # Errors
///
/// Returns an error only for I/O failures outside individual ability
/// files, such as an unreadable data directory.
pub fn collect(plugins: &[Plugin], abilities_subdir: &str) -> Result<AbilitySet> {
    let mut set = AbilitySet::default();

    for plugin in plugins {
        let data_dir = plugin.path.join(abilities_subdir);
        if !data_dir.is_dir() {
            debug!(plugin = %plugin.name, "no ability data directory");
            continue;
        }

        for path in ability_files(&data_dir)? {
            match parse_ability_file(&path) {
                Ok(records) => {
                    debug!(
                        plugin = %plugin.name,
                        file = %path.display(),
                        count = records.len(),
                        "parsed ability file"
                    );
                    for (index, ability) in records.into_iter().enumerate() {
                        set.abilities.push(PluginAbility {
                            plugin: plugin.name.clone(),
                            source: path.clone(),
                            index,
                            ability,
                        });
                    }
                }
                Err(reason) => {
                    warn!(
                        plugin = %plugin.name,
                        file = %path.display(),
                        %reason,
                        "skipping malformed ability file"
                    );
                    set.skipped.push(SkippedFile { path, reason });
                }
            }
        }
    }

    Ok(set)
}

/// Lists the YAML files under a data directory in sorted order.
fn ability_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(data_dir) {
        let entry = entry.map_err(std::io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yml" | "yaml")
        ) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Parses one ability file, which holds a YAML list of records.
fn parse_ability_file(path: &Path) -> std::result::Result<Vec<Ability>, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_yaml::from_str(&raw).map_err(|e| e.to_string())
}

// ============================================================================
// Tests
// ============================================================================
