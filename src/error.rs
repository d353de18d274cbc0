//! Error types for `fieldmanual`.
//!
//! Domain-specific error enums for configuration, stub generation, ability
//! export, and plugin import, aggregated into a top-level error with a
//! stable exit-code mapping.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `fieldmanual` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied, copy failure)
    pub const IO_ERROR: i32 = 3;

    /// Stub generator error (spawn failure, non-zero exit)
    pub const STUB_ERROR: i32 = 4;

    /// Export error (CSV write failure, strict validation failure)
    pub const EXPORT_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `fieldmanual` operations.
///
/// Aggregates all domain-specific errors and provides a unified
/// interface for error handling and exit code mapping.
#[derive(Debug, Error)]
pub enum FieldManualError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// API stub generator error
    #[error(transparent)]
    Stub(#[from] StubError),

    /// Ability export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Plugin documentation import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FieldManualError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Stub(_) => ExitCode::STUB_ERROR,
            Self::Export(_) => ExitCode::EXPORT_ERROR,
            Self::Import(_) | Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },

    /// Referenced configuration file or directory not found
    #[error("not found: {path}")]
    MissingPath {
        /// Path that does not exist
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// An exclude pattern failed glob compilation
    #[error("invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Error message from the pattern compiler
        message: String,
    },
}

// ============================================================================
// Stub Generator Errors
// ============================================================================

/// API stub generator subprocess errors.
///
/// Any failure here is fatal to the build: the generated API pages are a
/// required input of the site.
#[derive(Debug, Error)]
pub enum StubError {
    /// The generator process could not be started
    #[error("failed to run stub generator '{program}': {message}")]
    SpawnFailed {
        /// Configured program name
        program: String,
        /// Error message from the spawn attempt
        message: String,
    },

    /// The generator exited with a non-zero status
    #[error("stub generator '{program}' exited with status {code:?}: {stderr}")]
    NonZeroExit {
        /// Configured program name
        program: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured stderr output
        stderr: String,
    },
}

// ============================================================================
// Export Errors
// ============================================================================

/// Ability CSV export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing or persisting the output file failed
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        /// Destination path of the export
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An ability file could not be parsed under strict mode
    #[error("malformed ability file {path}: {message}")]
    MalformedSource {
        /// Path to the unparseable file
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },

    /// Strict-mode validation found errors
    #[error("ability validation failed with {} issue(s)", errors.len())]
    ValidationFailed {
        /// Issues found during validation
        errors: Vec<ValidationIssue>,
    },
}

// ============================================================================
// Import Errors
// ============================================================================

/// Plugin documentation import errors.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Copying a plugin's docs tree failed
    #[error("failed to import docs for plugin '{plugin}' from {path}: {source}")]
    CopyFailed {
        /// Plugin whose docs were being imported
        plugin: String,
        /// Source path that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Clearing a stale destination subtree failed
    #[error("failed to clear stale docs at {path}: {source}")]
    CleanFailed {
        /// Destination path that could not be removed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during ability metadata validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the source file
    pub path: String,
    /// Record field that failed (e.g., "ability[2].id")
    pub field: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{}: {} at {} ({})",
            prefix, self.message, self.field, self.path
        )
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Validation failure that blocks a strict build
    Error,
    /// Potential issue that does not block the build
    Warning,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `fieldmanual` operations.
pub type Result<T> = std::result::Result<T, FieldManualError>;

// ============================================================================
// Tests
// ============================================================================
