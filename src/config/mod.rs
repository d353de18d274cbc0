//! Site configuration for `fieldmanual`.
//!
//! Loads `fieldmanual.yml`, applies defaults for every field, validates the
//! result, and resolves the build's directory layout. All path resolution
//! happens here, once; the rest of the tool receives explicit absolute
//! paths and never consults the working directory or process environment.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default configuration file name, looked up inside the docs directory.
pub const DEFAULT_CONFIG_FILE: &str = "fieldmanual.yml";

// ============================================================================
// Schema
// ============================================================================

/// Top-level site configuration.
///
/// Every field has a default matching the platform's conventional layout,
/// so an absent or empty configuration file produces a working build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project identity used in page titles and the copyright line
    #[serde(default)]
    pub project: ProjectConfig,

    /// Directory layout relative to the docs directory and project root
    #[serde(default)]
    pub paths: PathsConfig,

    /// Glob patterns excluded from source collection
    #[serde(default = "SiteConfig::default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// HTML theme selection and options
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Maximum heading depth that receives a generated anchor
    #[serde(default = "SiteConfig::default_heading_anchors")]
    pub heading_anchors: u8,

    /// External API stub generator invocation
    #[serde(default)]
    pub stub_generator: StubGeneratorConfig,

    /// Alias the renderer uses for operator-command code blocks
    #[serde(default = "SiteConfig::default_command_language")]
    pub command_language: String,
}

impl SiteConfig {
    /// Default heading anchor depth.
    pub const DEFAULT_HEADING_ANCHORS: u8 = 4;

    /// Default command-language alias.
    pub const DEFAULT_COMMAND_LANGUAGE: &'static str = "operator";

    fn default_exclude_patterns() -> Vec<String> {
        vec![
            "_build".to_string(),
            "Thumbs.db".to_string(),
            ".DS_Store".to_string(),
        ]
    }

    const fn default_heading_anchors() -> u8 {
        Self::DEFAULT_HEADING_ANCHORS
    }

    fn default_command_language() -> String {
        Self::DEFAULT_COMMAND_LANGUAGE.to_string()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            paths: PathsConfig::default(),
            exclude_patterns: Self::default_exclude_patterns(),
            theme: ThemeConfig::default(),
            heading_anchors: Self::default_heading_anchors(),
            stub_generator: StubGeneratorConfig::default(),
            command_language: Self::default_command_language(),
        }
    }
}

/// Project identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name shown in titles
    #[serde(default = "ProjectConfig::default_name")]
    pub name: String,

    /// Author credited in generated metadata
    #[serde(default)]
    pub author: String,

    /// Copyright holder; falls back to `author` when unset
    #[serde(default)]
    pub copyright_holder: Option<String>,
}

impl ProjectConfig {
    fn default_name() -> String {
        "fieldmanual".to_string()
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            author: String::new(),
            copyright_holder: None,
        }
    }
}

/// Directory layout.
///
/// `root` is resolved relative to the docs directory; `app_dir` and
/// `plugins_dir` relative to the resolved root; `generated_dir` relative to
/// the docs directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path from the docs directory up to the host project root
    #[serde(default = "PathsConfig::default_root")]
    pub root: PathBuf,

    /// Application source tree handed to the stub generator
    #[serde(default = "PathsConfig::default_app_dir")]
    pub app_dir: String,

    /// Directory containing installed plugins
    #[serde(default = "PathsConfig::default_plugins_dir")]
    pub plugins_dir: String,

    /// Output directory for generated sources
    #[serde(default = "PathsConfig::default_generated_dir")]
    pub generated_dir: String,

    /// Docs subdirectory convention inside each plugin
    #[serde(default = "PathsConfig::default_docs_subdir")]
    pub docs_subdir: String,

    /// Ability data subdirectory convention inside each plugin
    #[serde(default = "PathsConfig::default_abilities_subdir")]
    pub abilities_subdir: String,
}

impl PathsConfig {
    fn default_root() -> PathBuf {
        // The docs tree conventionally lives at plugins/<name>/sphinx-docs,
        // three levels below the platform root
        PathBuf::from("../../..")
    }

    fn default_app_dir() -> String {
        "app".to_string()
    }

    fn default_plugins_dir() -> String {
        "plugins".to_string()
    }

    fn default_generated_dir() -> String {
        "_generated".to_string()
    }

    fn default_docs_subdir() -> String {
        "docs".to_string()
    }

    fn default_abilities_subdir() -> String {
        "data/abilities".to_string()
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            app_dir: Self::default_app_dir(),
            plugins_dir: Self::default_plugins_dir(),
            generated_dir: Self::default_generated_dir(),
            docs_subdir: Self::default_docs_subdir(),
            abilities_subdir: Self::default_abilities_subdir(),
        }
    }
}

/// HTML theme selection and options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme package name
    #[serde(default = "ThemeConfig::default_name")]
    pub name: String,

    /// Logo image path, relative to the docs directory
    #[serde(default)]
    pub logo: Option<String>,

    /// Show only the logo in the sidebar header, not the project name
    #[serde(default = "ThemeConfig::default_logo_only")]
    pub logo_only: bool,
}

impl ThemeConfig {
    /// Default theme package.
    pub const DEFAULT_THEME: &'static str = "sphinx_rtd_theme";

    fn default_name() -> String {
        Self::DEFAULT_THEME.to_string()
    }

    const fn default_logo_only() -> bool {
        true
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            logo: None,
            logo_only: Self::default_logo_only(),
        }
    }
}

/// External API stub generator invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StubGeneratorConfig {
    /// Program to run
    #[serde(default = "StubGeneratorConfig::default_program")]
    pub program: String,

    /// Extra arguments, shell-style (split with `shlex`)
    #[serde(default = "StubGeneratorConfig::default_args")]
    pub args: String,
}

impl StubGeneratorConfig {
    /// Default stub generator program.
    pub const DEFAULT_PROGRAM: &'static str = "sphinx-apidoc";

    fn default_program() -> String {
        Self::DEFAULT_PROGRAM.to_string()
    }

    fn default_args() -> String {
        "--implicit-namespaces --force".to_string()
    }
}

impl Default for StubGeneratorConfig {
    fn default() -> Self {
        Self {
            program: Self::default_program(),
            args: Self::default_args(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl SiteConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, fails to parse, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingPath {
            path: path.to_path_buf(),
        })?;

        // Handle UTF-8 BOM
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

        let config: Self = serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration at `path`, or returns defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to parse or validate.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validates field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range anchor depth, an empty stub
    /// generator program, or an exclude pattern that fails glob compilation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=6).contains(&self.heading_anchors) {
            return Err(ConfigError::InvalidValue {
                field: "heading_anchors".to_string(),
                value: self.heading_anchors.to_string(),
                expected: "a heading depth between 1 and 6".to_string(),
            });
        }

        if self.stub_generator.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "stub_generator.program".to_string(),
                value: self.stub_generator.program.clone(),
                expected: "a program name".to_string(),
            });
        }

        for pattern in &self.exclude_patterns {
            if let Err(e) = glob::Pattern::new(pattern) {
                return Err(ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Copyright line for generated metadata, e.g. `"2026, Example Org"`.
    #[must_use]
    pub fn copyright_line(&self) -> String {
        let year = chrono::Local::now().year();
        let holder = self
            .project
            .copyright_holder
            .as_deref()
            .unwrap_or(&self.project.author);
        format!("{year}, {holder}")
    }
}

// ============================================================================
// Resolved Layout
// ============================================================================

/// Absolute directory layout for one build.
///
/// Resolved once from the docs directory and configuration; everything
/// downstream receives this value instead of re-deriving paths.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    /// The docs directory the build was invoked for
    pub docs_dir: PathBuf,
    /// Host project root
    pub root: PathBuf,
    /// Application source tree handed to the stub generator
    pub app_dir: PathBuf,
    /// Installed plugins
    pub plugins_dir: PathBuf,
    /// Output directory for generated sources
    pub generated_dir: PathBuf,
}

impl BuildPaths {
    /// Resolves the build layout.
    ///
    /// The docs directory and project root must exist; the app, plugins,
    /// and generated directories are resolved but not required to exist
    /// yet (the steps that need them check or create them).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingPath`] when the docs directory or the
    /// project root cannot be resolved.
    pub fn resolve(
        docs_dir: &Path,
        config: &SiteConfig,
        root_override: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let docs_dir = std::fs::canonicalize(docs_dir).map_err(|_| ConfigError::MissingPath {
            path: docs_dir.to_path_buf(),
        })?;

        let root_candidate =
            root_override.map_or_else(|| docs_dir.join(&config.paths.root), Path::to_path_buf);
        let root =
            std::fs::canonicalize(&root_candidate).map_err(|_| ConfigError::MissingPath {
                path: root_candidate,
            })?;

        Ok(Self {
            app_dir: root.join(&config.paths.app_dir),
            plugins_dir: root.join(&config.paths.plugins_dir),
            generated_dir: docs_dir.join(&config.paths.generated_dir),
            docs_dir,
            root,
        })
    }

    /// Destination of the ability CSV export.
    #[must_use]
    pub fn abilities_csv(&self) -> PathBuf {
        self.generated_dir.join("abilities.csv")
    }

    /// Destination of the site metadata artifact.
    #[must_use]
    pub fn site_meta(&self) -> PathBuf {
        self.generated_dir.join("site_meta.json")
    }

    /// Destination root for imported plugin docs.
    #[must_use]
    pub fn plugin_docs_dest(&self) -> PathBuf {
        self.generated_dir.join("plugins")
    }
}

// ============================================================================
// Site Metadata Artifact
// ============================================================================

/// Resolved site metadata written to `site_meta.json` for the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct SiteMeta {
    /// Project name
    pub project: String,
    /// Author
    pub author: String,
    /// Copyright line with the build year
    pub copyright: String,
    /// Theme selection and options
    pub theme: ThemeConfig,
    /// Exclude patterns for the renderer's source collection
    pub exclude_patterns: Vec<String>,
    /// Heading anchor depth
    pub heading_anchors: u8,
    /// Command-language alias for operator code blocks
    pub command_language: String,
}

impl SiteMeta {
    /// Builds the metadata view of a configuration.
    #[must_use]
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            project: config.project.name.clone(),
            author: config.project.author.clone(),
            copyright: config.copyright_line(),
            theme: config.theme.clone(),
            exclude_patterns: config.exclude_patterns.clone(),
            heading_anchors: config.heading_anchors,
            command_language: config.command_language.clone(),
        }
    }

    /// Serializes and writes the artifact to `path`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails.
    pub fn write(&self, path: &Path) -> crate::error::Result<()> {
        let rendered = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, rendered)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_mapping() {
        let config: SiteConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.project.name, "fieldmanual");
        assert_eq!(config.paths.root, PathBuf::from("../../.."));
        assert_eq!(config.theme.name, "sphinx_rtd_theme");
        assert!(config.theme.logo_only);
        assert_eq!(config.heading_anchors, 4);
        assert_eq!(config.paths.generated_dir, "_generated");
        assert_eq!(config.paths.docs_subdir, "docs");
        assert_eq!(config.paths.abilities_subdir, "data/abilities");
        assert_eq!(config.stub_generator.program, "sphinx-apidoc");
        assert_eq!(
            config.exclude_patterns,
            vec!["_build", "Thumbs.db", ".DS_Store"]
        );
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
project:
  name: opforge
  author: Example Org
paths:
  root: ../../..
  plugins_dir: modules
theme:
  name: furo
  logo: img/logo.png
  logo_only: false
heading_anchors: 3
stub_generator:
  program: api-stubber
  args: --force
command_language: opcmd
";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.project.name, "opforge");
        assert_eq!(config.paths.root, PathBuf::from("../../.."));
        assert_eq!(config.paths.plugins_dir, "modules");
        // Unspecified fields keep their defaults
        assert_eq!(config.paths.app_dir, "app");
        assert_eq!(config.theme.name, "furo");
        assert_eq!(config.theme.logo.as_deref(), Some("img/logo.png"));
        assert!(!config.theme.logo_only);
        assert_eq!(config.heading_anchors, 3);
        assert_eq!(config.command_language, "opcmd");
    }

    #[test]
    fn test_validate_rejects_zero_anchor_depth() {
        let mut config = SiteConfig::default();
        config.heading_anchors = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_program() {
        let mut config = SiteConfig::default();
        config.stub_generator.program = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let mut config = SiteConfig::default();
        config.exclude_patterns.push("[unclosed".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_load_strips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fieldmanual.yml");
        std::fs::write(&path, "\u{feff}project:\n  name: bom-test\n").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.project.name, "bom-test");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load_or_default(&dir.path().join("absent.yml")).unwrap();
        assert_eq!(config.project.name, "fieldmanual");
    }

    #[test]
    fn test_load_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fieldmanual.yml");
        std::fs::write(&path, "project: [unterminated\n").unwrap();
        assert!(matches!(
            SiteConfig::load(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_copyright_line_uses_holder_over_author() {
        let mut config = SiteConfig::default();
        config.project.author = "Author".to_string();
        config.project.copyright_holder = Some("Holder".to_string());
        assert!(config.copyright_line().ends_with(", Holder"));
    }

    #[test]
    fn test_copyright_line_falls_back_to_author() {
        let mut config = SiteConfig::default();
        config.project.author = "Example Org".to_string();
        assert!(config.copyright_line().ends_with(", Example Org"));
    }

    #[test]
    fn test_resolve_build_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let docs = root.join("plugins/fieldmanual/sphinx-docs");
        std::fs::create_dir_all(&docs).unwrap();

        let config = SiteConfig::default();

        let paths = BuildPaths::resolve(&docs, &config, None).unwrap();
        assert_eq!(paths.root, std::fs::canonicalize(root).unwrap());
        assert_eq!(paths.app_dir, paths.root.join("app"));
        assert_eq!(paths.plugins_dir, paths.root.join("plugins"));
        assert_eq!(paths.generated_dir, paths.docs_dir.join("_generated"));
        assert_eq!(
            paths.abilities_csv(),
            paths.generated_dir.join("abilities.csv")
        );
    }

    #[test]
    fn test_resolve_missing_docs_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let missing = dir.path().join("nope");
        assert!(matches!(
            BuildPaths::resolve(&missing, &config, None),
            Err(ConfigError::MissingPath { .. })
        ));
    }

    #[test]
    fn test_root_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        let other_root = dir.path().join("elsewhere");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::create_dir_all(&other_root).unwrap();

        let config = SiteConfig::default();
        let paths = BuildPaths::resolve(&docs, &config, Some(&other_root)).unwrap();
        assert_eq!(paths.root, std::fs::canonicalize(&other_root).unwrap());
    }

    #[test]
    fn test_site_meta_from_config() {
        let mut config = SiteConfig::default();
        config.project.name = "opforge".to_string();
        config.project.author = "Example Org".to_string();
        let meta = SiteMeta::from_config(&config);
        assert_eq!(meta.project, "opforge");
        assert_eq!(meta.command_language, "operator");
        assert!(meta.copyright.ends_with(", Example Org"));
    }

    #[test]
    fn test_site_meta_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("_generated/site_meta.json");
        let meta = SiteMeta::from_config(&SiteConfig::default());
        meta.write(&dest).unwrap();
        let raw = std::fs::read_to_string(&dest).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["theme"]["name"], "sphinx_rtd_theme");
        assert_eq!(parsed["heading_anchors"], 4);
    }
}
