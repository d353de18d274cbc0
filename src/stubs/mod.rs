//! API stub generation.
//!
//! Runs the configured external generator (by default `sphinx-apidoc`)
//! against the application source tree, writing stub pages into the
//! generated-sources directory. Stub generation is a required build input:
//! spawn failures and non-zero exits are fatal, while a clean exit that
//! still printed to stderr only logs a warning.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info, warn};

use crate::config::{BuildPaths, StubGeneratorConfig};
use crate::error::{ConfigError, Result, StubError};

/// Outcome of a stub generator run.
#[derive(Debug, Clone)]
pub struct StubReport {
    /// Program that ran
    pub program: String,
    /// Number of files present in the output directory after the run
    pub stub_files: usize,
}

/// Runs the stub generator.
///
/// The invocation is `<program> -o <generated_dir> <extra args> <app_dir>`,
/// with extra args taken shell-style from configuration.
///
/// # Errors
///
/// Returns an error when the application directory is missing, the extra
/// args cannot be split, the program cannot be spawned, or it exits
/// non-zero.
pub fn generate(config: &StubGeneratorConfig, paths: &BuildPaths) -> Result<StubReport> {
    if !paths.app_dir.is_dir() {
        return Err(ConfigError::MissingPath {
            path: paths.app_dir.clone(),
        }
        .into());
    }
    std::fs::create_dir_all(&paths.generated_dir)?;

    let args = build_argv(config, paths)?;
    debug!(program = %config.program, ?args, "running stub generator");

    let output = Command::new(&config.program)
        .args(&args)
        .output()
        .map_err(|e| StubError::SpawnFailed {
            program: config.program.clone(),
            message: e.to_string(),
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        return Err(StubError::NonZeroExit {
            program: config.program.clone(),
            code: output.status.code(),
            stderr,
        }
        .into());
    }

    // Exit 0 with stderr output still counts as success
    if !stderr.is_empty() {
        warn!(program = %config.program, stderr = %stderr, "stub generator produced stderr output");
    }

    let stub_files = count_files(&paths.generated_dir)?;
    info!(
        program = %config.program,
        files = stub_files,
        out = %paths.generated_dir.display(),
        "stub generation complete"
    );

    Ok(StubReport {
        program: config.program.clone(),
        stub_files,
    })
}

/// Assembles the generator's argument vector (program name excluded).
fn build_argv(
    config: &StubGeneratorConfig,
    paths: &BuildPaths,
) -> std::result::Result<Vec<OsString>, ConfigError> {
    let extra = shlex::split(&config.args).ok_or_else(|| ConfigError::InvalidValue {
        field: "stub_generator.args".to_string(),
        value: config.args.clone(),
        expected: "a shell-style argument string".to_string(),
    })?;

    let mut args: Vec<OsString> = vec!["-o".into(), paths.generated_dir.as_os_str().into()];
    args.extend(extra.into_iter().map(OsString::from));
    args.push(paths.app_dir.as_os_str().into());
    Ok(args)
}

/// Counts regular files directly inside a directory.
fn count_files(dir: &Path) -> std::io::Result<usize> {
    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        if entry?.file_type()?.is_file() {
            count += 1;
        }
    }
    Ok(count)
}

// ============================================================================
// Tests
// ============================================================================
