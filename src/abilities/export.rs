//! Ability CSV export.
//!
//! Flattens a discovered ability set into `abilities.csv` with a fixed
//! column schema. The file is written through a temp file in the
//! destination directory and renamed into place, so a failed export never
//! leaves a partial CSV behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use super::{AbilitySet, PluginAbility};
use crate::error::ExportError;

/// Column schema of the export. Fixed: consumers rely on this order.
pub const COLUMNS: [&str; 7] = [
    "plugin",
    "ability_id",
    "name",
    "tactic",
    "technique_id",
    "technique_name",
    "description",
];

/// Outcome of a CSV export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Number of data rows written (header excluded)
    pub rows: usize,
    /// Destination path
    pub dest: PathBuf,
}

/// Renders the ability set as CSV text.
///
/// The header row comes first; data rows are sorted by plugin, tactic,
/// ability ID, and name, so identical trees render byte-identically.
#[must_use]
pub fn render_csv(set: &AbilitySet) -> String {
    let mut rows: Vec<&PluginAbility> = set.abilities.iter().collect();
    rows.sort_by(|a, b| {
        (&a.plugin, &a.ability.tactic, &a.ability.id, &a.ability.name).cmp(&(
            &b.plugin,
            &b.ability.tactic,
            &b.ability.id,
            &b.ability.name,
        ))
    });

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(COLUMNS.join(","));
    for record in rows {
        let ability = &record.ability;
        let fields = [
            record.plugin.as_str(),
            ability.id.as_str(),
            ability.name.as_str(),
            ability.tactic.as_str(),
            ability.technique.attack_id.as_str(),
            ability.technique.name.as_str(),
            ability.description.as_str(),
        ];
        lines.push(
            fields
                .iter()
                .map(|f| csv_field(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes the ability set to `dest` atomically.
///
/// # Errors
///
/// Returns [`ExportError::WriteFailed`] if any filesystem step fails; the
/// destination path is left untouched in that case.
pub fn export_csv(set: &AbilitySet, dest: &Path) -> Result<ExportSummary, ExportError> {
    let rendered = render_csv(set);

    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| ExportError::WriteFailed {
        path: dest.to_path_buf(),
        source: e,
    })?;

    // Temp file in the destination directory keeps the final rename on one
    // filesystem
    let mut temp = NamedTempFile::new_in(parent).map_err(|e| ExportError::WriteFailed {
        path: dest.to_path_buf(),
        source: e,
    })?;
    temp.write_all(rendered.as_bytes())
        .map_err(|e| ExportError::WriteFailed {
            path: dest.to_path_buf(),
            source: e,
        })?;
    temp.persist(dest).map_err(|e| ExportError::WriteFailed {
        path: dest.to_path_buf(),
        source: e.error,
    })?;

    let summary = ExportSummary {
        rows: set.abilities.len(),
        dest: dest.to_path_buf(),
    };
    info!(rows = summary.rows, dest = %summary.dest.display(), "exported ability CSV");
    Ok(summary)
}

/// Escapes one CSV field.
///
/// Fields containing the delimiter, quotes, or line breaks are quoted with
/// embedded quotes doubled.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{Ability, TechniqueRef};

    fn record(plugin: &str, id: &str, name: &str, tactic: &str, description: &str) -> PluginAbility {
        PluginAbility {
            plugin: plugin.to_string(),
            source: PathBuf::from(format!("{plugin}/data/abilities/x.yml")),
            index: 0,
            ability: Ability {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                tactic: tactic.to_string(),
                technique: TechniqueRef {
                    attack_id: "T1059".to_string(),
                    name: "Command and Scripting Interpreter".to_string(),
                },
            },
        }
    }

    fn set_of(records: Vec<PluginAbility>) -> AbilitySet {
        AbilitySet {
            abilities: records,
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_header_is_first_line() {
        let csv = render_csv(&set_of(vec![]));
        assert_eq!(
            csv,
            "plugin,ability_id,name,tactic,technique_id,technique_name,description\n"
        );
    }

    #[test]
    fn test_one_row_per_record() {
        let set = set_of(vec![
            record("stockpile", "a1", "One", "discovery", "first"),
            record("stockpile", "a2", "Two", "discovery", "second"),
        ]);
        let csv = render_csv(&set);
        assert_eq!(csv.trim_end().lines().count(), 3);
    }

    #[test]
    fn test_comma_in_field_is_quoted() {
        let set = set_of(vec![record("p", "T1", "A", "t", "x,y")]);
        let csv = render_csv(&set);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.ends_with(",\"x,y\""), "row was: {row}");
    }

    #[test]
    fn test_quote_in_field_is_doubled() {
        let set = set_of(vec![record("p", "T1", "say \"hi\"", "t", "d")]);
        let csv = render_csv(&set);
        assert!(csv.contains("\"say \"\"hi\"\"\""));
    }

    #[test]
    fn test_newline_in_field_is_quoted() {
        let set = set_of(vec![record("p", "T1", "A", "t", "line one\nline two")]);
        let csv = render_csv(&set);
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_rows_sorted_by_plugin_then_tactic_then_id() {
        let set = set_of(vec![
            record("stockpile", "b", "B", "lateral-movement", ""),
            record("atomic", "z", "Z", "discovery", ""),
            record("stockpile", "a", "A", "discovery", ""),
        ]);
        let csv = render_csv(&set);
        let ids: Vec<_> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').nth(1).unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["z", "a", "b"]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let set = set_of(vec![
            record("stockpile", "a1", "One", "discovery", "first"),
            record("atomic", "a2", "Two", "execution", "second"),
        ]);
        assert_eq!(render_csv(&set), render_csv(&set));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("_generated/abilities.csv");
        let set = set_of(vec![record("p", "T1", "A", "t", "x,y")]);

        let summary = export_csv(&set, &dest).unwrap();
        assert_eq!(summary.rows, 1);
        let written = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(written, render_csv(&set));
    }

    #[test]
    fn test_export_failure_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // Parent path occupied by a file, so the directory cannot be created
        let blocker = dir.path().join("_generated");
        std::fs::write(&blocker, "in the way").unwrap();
        let dest = blocker.join("abilities.csv");

        let set = set_of(vec![record("p", "T1", "A", "t", "d")]);
        let err = export_csv(&set, &dest).unwrap_err();
        assert!(matches!(err, ExportError::WriteFailed { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_quoted_fields_parse_back() {
        let set = set_of(vec![record("p", "T1", "A", "t", "x,y")]);
        let csv = render_csv(&set);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            parse_csv_row(row),
            vec![
                "p",
                "T1",
                "A",
                "t",
                "T1059",
                "Command and Scripting Interpreter",
                "x,y"
            ]
        );
    }

    // Minimal RFC 4180 row parser used only to check round-tripping
    fn parse_csv_row(row: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut chars = row.chars().peekable();
        let mut in_quotes = false;
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '"' => in_quotes = true,
                ',' if !in_quotes => {
                    fields.push(std::mem::take(&mut field));
                }
                _ => field.push(c),
            }
        }
        fields.push(field);
        fields
    }
}
