//! CLI argument definitions
//!
//! All Clap derive structs for `fieldmanual` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Documentation build preparation for plugin-based platforms.
#[derive(Parser, Debug)]
#[command(name = "fieldmanual", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "FIELDMANUAL_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full documentation preparation pipeline.
    Build(BuildArgs),

    /// Inspect, validate, or export plugin abilities.
    Abilities(AbilitiesCommand),

    /// Discover plugins or import their bundled documentation.
    Plugins(PluginsCommand),

    /// Tokenize an operator command line for syntax highlighting.
    Highlight(HighlightArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Build Command
// ============================================================================

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Documentation source directory the build runs from.
    #[arg(short, long, default_value = ".", env = "FIELDMANUAL_DOCS_DIR")]
    pub docs_dir: PathBuf,

    /// Override the platform root (default: resolved from configuration).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to the site configuration file.
    #[arg(short, long, env = "FIELDMANUAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip the API stub generation step.
    #[arg(long)]
    pub skip_stubs: bool,

    /// Fail the build on malformed ability files or validation errors.
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Abilities Command
// ============================================================================

/// Ability management commands.
#[derive(Args, Debug)]
pub struct AbilitiesCommand {
    /// Abilities subcommand.
    #[command(subcommand)]
    pub subcommand: AbilitiesSubcommand,
}

/// Abilities subcommands.
#[derive(Subcommand, Debug)]
pub enum AbilitiesSubcommand {
    /// Export all plugin abilities to a CSV catalog.
    Export(AbilitiesExportArgs),

    /// List abilities discovered across plugins.
    List(AbilitiesListArgs),

    /// Validate ability records without exporting.
    Validate(AbilitiesValidateArgs),
}

/// Arguments for `abilities export`.
#[derive(Args, Debug)]
pub struct AbilitiesExportArgs {
    /// Documentation source directory the build runs from.
    #[arg(short, long, default_value = ".", env = "FIELDMANUAL_DOCS_DIR")]
    pub docs_dir: PathBuf,

    /// Override the platform root (default: resolved from configuration).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to the site configuration file.
    #[arg(short, long, env = "FIELDMANUAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the CSV to this path instead of the generated directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail the export on malformed ability files or validation errors.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `abilities list`.
#[derive(Args, Debug)]
pub struct AbilitiesListArgs {
    /// Documentation source directory the build runs from.
    #[arg(short, long, default_value = ".", env = "FIELDMANUAL_DOCS_DIR")]
    pub docs_dir: PathBuf,

    /// Override the platform root (default: resolved from configuration).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to the site configuration file.
    #[arg(short, long, env = "FIELDMANUAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only list abilities from this plugin.
    #[arg(long)]
    pub plugin: Option<String>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `abilities validate`.
#[derive(Args, Debug)]
pub struct AbilitiesValidateArgs {
    /// Documentation source directory the build runs from.
    #[arg(short, long, default_value = ".", env = "FIELDMANUAL_DOCS_DIR")]
    pub docs_dir: PathBuf,

    /// Override the platform root (default: resolved from configuration).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to the site configuration file.
    #[arg(short, long, env = "FIELDMANUAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Treat validation warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Plugins Command
// ============================================================================

/// Plugin management commands.
#[derive(Args, Debug)]
pub struct PluginsCommand {
    /// Plugins subcommand.
    #[command(subcommand)]
    pub subcommand: PluginsSubcommand,
}

/// Plugins subcommands.
#[derive(Subcommand, Debug)]
pub enum PluginsSubcommand {
    /// List discovered plugins and their documentation status.
    List(PluginsListArgs),

    /// Import bundled plugin documentation into the docs tree.
    Import(PluginsImportArgs),
}

/// Arguments for `plugins list`.
#[derive(Args, Debug)]
pub struct PluginsListArgs {
    /// Documentation source directory the build runs from.
    #[arg(short, long, default_value = ".", env = "FIELDMANUAL_DOCS_DIR")]
    pub docs_dir: PathBuf,

    /// Override the platform root (default: resolved from configuration).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to the site configuration file.
    #[arg(short, long, env = "FIELDMANUAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `plugins import`.
#[derive(Args, Debug)]
pub struct PluginsImportArgs {
    /// Documentation source directory the build runs from.
    #[arg(short, long, default_value = ".", env = "FIELDMANUAL_DOCS_DIR")]
    pub docs_dir: PathBuf,

    /// Override the platform root (default: resolved from configuration).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to the site configuration file.
    #[arg(short, long, env = "FIELDMANUAL_CONFIG")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Highlight Command
// ============================================================================

/// Arguments for `highlight`.
#[derive(Args, Debug)]
pub struct HighlightArgs {
    /// Command line to tokenize (reads stdin when omitted).
    pub line: Option<String>,

    /// Output format.
    #[arg(short, long, default_value = "spans")]
    pub format: HighlightFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Rendering format for highlighted command lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HighlightFormat {
    /// One span per line as `category<TAB>text`.
    #[default]
    Spans,
    /// HTML with Pygments-compatible class names.
    Html,
    /// JSON array of span objects.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
