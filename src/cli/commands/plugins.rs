//! Plugin command handlers
//!
//! Implements `plugins list` and `plugins import`.

use crate::cli::args::{OutputFormat, PluginsImportArgs, PluginsListArgs};
use crate::error::FieldManualError;
use crate::plugins;

use super::load_site;

/// List discovered plugins and their documentation status.
///
/// # Errors
///
/// Returns an error if configuration fails to load or the plugins
/// directory cannot be scanned.
pub fn list(args: &PluginsListArgs) -> Result<(), FieldManualError> {
    let (config, paths) = load_site(&args.docs_dir, args.config.as_deref(), args.root.as_deref())?;

    let plugins = plugins::discover(&paths.plugins_dir, &config.paths.docs_subdir)?;

    match args.format {
        OutputFormat::Human => {
            for plugin in &plugins {
                let docs = plugin
                    .docs
                    .as_path()
                    .map_or_else(|| "-".to_string(), |path| path.display().to_string());
                println!("{:<20} {docs}", plugin.name);
            }
            tracing::info!(count = plugins.len(), "listed plugins");
        }
        OutputFormat::Json => {
            let items: Vec<serde_json::Value> = plugins
                .iter()
                .map(|plugin| {
                    serde_json::json!({
                        "name": plugin.name,
                        "path": plugin.path.display().to_string(),
                        "docs": plugin.docs.as_path().map(|p| p.display().to_string()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }
    Ok(())
}

/// Import bundled plugin documentation into the docs tree.
///
/// # Errors
///
/// Returns an error if discovery fails or a docs subtree cannot be
/// cleared or copied.
pub fn import(args: &PluginsImportArgs) -> Result<(), FieldManualError> {
    let (config, paths) = load_site(&args.docs_dir, args.config.as_deref(), args.root.as_deref())?;

    let plugins = plugins::discover(&paths.plugins_dir, &config.paths.docs_subdir)?;
    let report = plugins::import_docs(&plugins, &paths.plugin_docs_dest())?;

    println!(
        "imported docs for {} plugins ({} files), {} without docs",
        report.imported.len(),
        report.files_copied,
        report.skipped.len()
    );
    Ok(())
}
