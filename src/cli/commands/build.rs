//! Build command handler
//!
//! Runs the full documentation preparation pipeline: API stubs, plugin
//! docs import, ability CSV export, and the site metadata artifact.

use crate::abilities;
use crate::abilities::export::export_csv;
use crate::cli::args::BuildArgs;
use crate::config::SiteMeta;
use crate::error::FieldManualError;
use crate::plugins;
use crate::stubs;

use super::{ability_gate, load_site};

/// Run the documentation preparation pipeline.
///
/// # Errors
///
/// Returns an error if configuration fails to load, the stub generator
/// fails, a plugin docs import fails, or (under `--strict`) ability data
/// is malformed or invalid.
pub fn run(args: &BuildArgs) -> Result<(), FieldManualError> {
    let (config, paths) = load_site(&args.docs_dir, args.config.as_deref(), args.root.as_deref())?;
    tracing::info!(
        docs_dir = %paths.docs_dir.display(),
        root = %paths.root.display(),
        "resolved build layout"
    );

    if args.skip_stubs {
        tracing::info!("skipping API stub generation");
    } else {
        let report = stubs::generate(&config.stub_generator, &paths)?;
        tracing::info!(
            program = %report.program,
            stub_files = report.stub_files,
            "generated API stubs"
        );
    }

    let plugins = plugins::discover(&paths.plugins_dir, &config.paths.docs_subdir)?;
    tracing::info!(count = plugins.len(), "discovered plugins");

    let import = plugins::import_docs(&plugins, &paths.plugin_docs_dest())?;

    let set = abilities::collect(&plugins, &config.paths.abilities_subdir)?;
    ability_gate(&set, args.strict)?;

    let summary = export_csv(&set, &paths.abilities_csv())?;

    let meta = SiteMeta::from_config(&config);
    meta.write(&paths.site_meta())?;
    tracing::info!(path = %paths.site_meta().display(), "wrote site metadata");

    println!(
        "build complete: {} plugins, {} docs trees imported, {} abilities exported",
        plugins.len(),
        import.imported.len(),
        summary.rows
    );
    Ok(())
}
