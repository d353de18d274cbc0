//! Ability metadata validation.
//!
//! Checks the hygiene rules the platform expects of ability records: IDs
//! are UUIDs and unique across plugins, names and tactics are present, and
//! technique IDs follow the ATT&CK format. Warnings flag cosmetic gaps;
//! errors fail strict builds.

use std::collections::HashMap;

use uuid::Uuid;

use super::{AbilitySet, PluginAbility};
use crate::error::{Severity, ValidationIssue};

/// Validates every record in the set, including cross-record ID
/// uniqueness.
///
/// Returns all issues found; an empty list means the set is clean.
#[must_use]
pub fn validate_abilities(set: &AbilitySet) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for record in &set.abilities {
        validate_record(record, &mut issues);
    }
    issues.extend(detect_duplicate_ids(&set.abilities));
    issues
}

/// True when any issue is a hard error.
#[must_use]
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Validates a single record's fields.
fn validate_record(record: &PluginAbility, issues: &mut Vec<ValidationIssue>) {
    let path = record.source.display().to_string();
    let ability = &record.ability;
    let field = |name: &str| format!("ability[{}].{name}", record.index);

    if Uuid::parse_str(&ability.id).is_err() {
        issues.push(ValidationIssue {
            path: path.clone(),
            field: field("id"),
            message: format!("expected a UUID, got \"{}\"", ability.id),
            severity: Severity::Error,
        });
    }

    if ability.name.trim().is_empty() {
        issues.push(ValidationIssue {
            path: path.clone(),
            field: field("name"),
            message: "name is empty".to_string(),
            severity: Severity::Error,
        });
    }

    if ability.tactic.trim().is_empty() {
        issues.push(ValidationIssue {
            path: path.clone(),
            field: field("tactic"),
            message: "tactic is empty".to_string(),
            severity: Severity::Error,
        });
    }

    if !is_valid_technique_id(&ability.technique.attack_id) {
        issues.push(ValidationIssue {
            path: path.clone(),
            field: field("technique.attack_id"),
            message: format!(
                "expected format T followed by 4 digits (optional .NNN), got \"{}\"",
                ability.technique.attack_id
            ),
            severity: Severity::Error,
        });
    }

    if ability.description.trim().is_empty() {
        issues.push(ValidationIssue {
            path,
            field: field("description"),
            message: "description is empty".to_string(),
            severity: Severity::Warning,
        });
    }
}

/// Detects ability IDs used by more than one record across the set.
fn detect_duplicate_ids(records: &[PluginAbility]) -> Vec<ValidationIssue> {
    let mut seen: HashMap<&str, &PluginAbility> = HashMap::new();
    let mut issues = Vec::new();

    for record in records {
        if let Some(first) = seen.get(record.ability.id.as_str()) {
            issues.push(ValidationIssue {
                path: record.source.display().to_string(),
                field: format!("ability[{}].id", record.index),
                message: format!(
                    "duplicate ID \"{}\", first seen in {}",
                    record.ability.id,
                    first.source.display()
                ),
                severity: Severity::Error,
            });
        } else {
            seen.insert(&record.ability.id, record);
        }
    }

    issues
}

/// Check if an ID matches `T\d{4}(\.\d{3})?`.
fn is_valid_technique_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    if bytes.len() == 5 {
        bytes[0] == b'T' && bytes[1..].iter().all(u8::is_ascii_digit)
    } else if bytes.len() == 9 {
        bytes[0] == b'T'
            && bytes[1..5].iter().all(u8::is_ascii_digit)
            && bytes[5] == b'.'
            && bytes[6..].iter().all(u8::is_ascii_digit)
    } else {
        false
    }
}
