//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod abilities;
pub mod build;
pub mod completions;
pub mod highlight;
pub mod plugins;
pub mod version;

use std::path::Path;

use crate::abilities::AbilitySet;
use crate::abilities::validate::{has_errors, validate_abilities};
use crate::cli::args::{AbilitiesSubcommand, Cli, Commands, PluginsSubcommand};
use crate::config::{BuildPaths, DEFAULT_CONFIG_FILE, SiteConfig};
use crate::error::{ExportError, FieldManualError, Severity};

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), FieldManualError> {
    match cli.command {
        Commands::Build(args) => build::run(&args),
        Commands::Abilities(cmd) => match cmd.subcommand {
            AbilitiesSubcommand::Export(args) => abilities::export(&args),
            AbilitiesSubcommand::List(args) => abilities::list(&args),
            AbilitiesSubcommand::Validate(args) => abilities::validate(&args),
        },
        Commands::Plugins(cmd) => match cmd.subcommand {
            PluginsSubcommand::List(args) => plugins::list(&args),
            PluginsSubcommand::Import(args) => plugins::import(&args),
        },
        Commands::Highlight(args) => highlight::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Loads the site configuration and resolves the build layout.
///
/// An explicit `--config` path must exist; otherwise the default file is
/// looked up inside the docs directory and absence falls back to defaults.
pub(crate) fn load_site(
    docs_dir: &Path,
    config_path: Option<&Path>,
    root_override: Option<&Path>,
) -> Result<(SiteConfig, BuildPaths), FieldManualError> {
    let config = match config_path {
        Some(path) => {
            tracing::info!(config = %path.display(), "loading configuration");
            SiteConfig::load(path)?
        }
        None => {
            let default_path = docs_dir.join(DEFAULT_CONFIG_FILE);
            tracing::debug!(config = %default_path.display(), "loading configuration or defaults");
            SiteConfig::load_or_default(&default_path)?
        }
    };

    let paths = BuildPaths::resolve(docs_dir, &config, root_override)?;
    Ok((config, paths))
}

/// Applies the strict gate to a collected ability set.
///
/// In strict mode any skipped source file or validation error aborts the
/// run. Otherwise issues are logged as warnings and the run continues.
pub(crate) fn ability_gate(set: &AbilitySet, strict: bool) -> Result<(), FieldManualError> {
    if strict {
        if let Some(first) = set.skipped.first() {
            return Err(ExportError::MalformedSource {
                path: first.path.clone(),
                message: first.reason.clone(),
            }
            .into());
        }

        let issues = validate_abilities(set);
        if has_errors(&issues) {
            let errors = issues
                .into_iter()
                .filter(|issue| issue.severity == Severity::Error)
                .collect();
            return Err(ExportError::ValidationFailed { errors }.into());
        }

        for issue in issues {
            tracing::warn!(%issue, "ability validation");
        }
        return Ok(());
    }

    for issue in validate_abilities(set) {
        tracing::warn!(%issue, "ability validation");
    }
    Ok(())
}
