//! Ability command handlers
//!
//! Implements `abilities export`, `abilities list`, and `abilities validate`.

use crate::abilities::export::export_csv;
use crate::abilities::validate::{has_errors, validate_abilities};
use crate::abilities::{self, AbilitySet, PluginAbility};
use crate::cli::args::{
    AbilitiesExportArgs, AbilitiesListArgs, AbilitiesValidateArgs, OutputFormat,
};
use crate::error::{ExportError, FieldManualError, Severity, ValidationIssue};
use crate::plugins;

use super::{ability_gate, load_site};

/// Export all plugin abilities to a CSV catalog.
///
/// # Errors
///
/// Returns an error if discovery or the write fails, or (under
/// `--strict`) when ability data is malformed or invalid.
pub fn export(args: &AbilitiesExportArgs) -> Result<(), FieldManualError> {
    let (config, paths) = load_site(&args.docs_dir, args.config.as_deref(), args.root.as_deref())?;

    let plugins = plugins::discover(&paths.plugins_dir, &config.paths.docs_subdir)?;
    let set = abilities::collect(&plugins, &config.paths.abilities_subdir)?;
    ability_gate(&set, args.strict)?;

    let dest = args
        .output
        .clone()
        .unwrap_or_else(|| paths.abilities_csv());
    let summary = export_csv(&set, &dest)?;

    println!(
        "exported {} abilities to {}",
        summary.rows,
        summary.dest.display()
    );
    Ok(())
}

/// List abilities discovered across plugins.
///
/// # Errors
///
/// Returns an error if configuration fails to load or discovery fails.
pub fn list(args: &AbilitiesListArgs) -> Result<(), FieldManualError> {
    let (config, paths) = load_site(&args.docs_dir, args.config.as_deref(), args.root.as_deref())?;

    let plugins = plugins::discover(&paths.plugins_dir, &config.paths.docs_subdir)?;
    let set = abilities::collect(&plugins, &config.paths.abilities_subdir)?;

    let records: Vec<&PluginAbility> = set
        .abilities
        .iter()
        .filter(|record| match &args.plugin {
            Some(plugin) => record.plugin == *plugin,
            None => true,
        })
        .collect();

    match args.format {
        OutputFormat::Human => {
            for record in &records {
                println!(
                    "{:<12} {:<38} {:<20} {} ({})",
                    record.plugin,
                    record.ability.id,
                    record.ability.tactic,
                    record.ability.name,
                    record.ability.technique.attack_id
                );
            }
            tracing::info!(
                abilities = records.len(),
                skipped_files = set.skipped.len(),
                "listed abilities"
            );
        }
        OutputFormat::Json => {
            let items: Vec<serde_json::Value> = records
                .iter()
                .map(|record| {
                    serde_json::json!({
                        "plugin": record.plugin,
                        "ability_id": record.ability.id,
                        "name": record.ability.name,
                        "tactic": record.ability.tactic,
                        "technique_id": record.ability.technique.attack_id,
                        "technique_name": record.ability.technique.name,
                        "description": record.ability.description,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }
    Ok(())
}

/// Validate ability records without exporting.
///
/// # Errors
///
/// Returns [`ExportError::ValidationFailed`] when any error-severity issue
/// is found, or any issue at all under `--strict`.
pub fn validate(args: &AbilitiesValidateArgs) -> Result<(), FieldManualError> {
    let (config, paths) = load_site(&args.docs_dir, args.config.as_deref(), args.root.as_deref())?;

    let plugins = plugins::discover(&paths.plugins_dir, &config.paths.docs_subdir)?;
    let set = abilities::collect(&plugins, &config.paths.abilities_subdir)?;

    let issues = collect_issues(&set);

    match args.format {
        OutputFormat::Human => {
            for issue in &issues {
                println!("{issue}");
            }
            if issues.is_empty() {
                println!("{} abilities valid", set.len());
            }
        }
        OutputFormat::Json => {
            let items: Vec<serde_json::Value> = issues
                .iter()
                .map(|issue| {
                    serde_json::json!({
                        "severity": match issue.severity {
                            Severity::Error => "error",
                            Severity::Warning => "warning",
                        },
                        "path": issue.path,
                        "field": issue.field,
                        "message": issue.message,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    let failed = has_errors(&issues) || (args.strict && !issues.is_empty());
    if failed {
        let errors = issues
            .into_iter()
            .filter(|issue| args.strict || issue.severity == Severity::Error)
            .collect();
        return Err(ExportError::ValidationFailed { errors }.into());
    }
    Ok(())
}

/// Collects file-level and record-level issues, files first.
fn collect_issues(set: &AbilitySet) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = set
        .skipped
        .iter()
        .map(|skipped| ValidationIssue {
            path: skipped.path.display().to_string(),
            field: "file".to_string(),
            message: skipped.reason.clone(),
            severity: Severity::Error,
        })
        .collect();
    issues.extend(validate_abilities(set));
    issues
}
