//! Shared integration-test harness for running the `fieldmanual` binary
//! against throwaway platform trees.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// A well-formed ability file with one record, in the platform's format.
pub const STOCKPILE_ABILITY: &str = r#"
- id: 3c647f5e-6b98-4692-9e5a-6b7cbfbb8a10
  name: Find local users
  description: Enumerate local user accounts
  tactic: discovery
  technique:
    attack_id: T1087.001
    name: "Account Discovery: Local Account"
  executors:
    - platform: linux
      command: cat /etc/passwd
"#;

/// A throwaway platform tree.
///
/// Mirrors the conventional layout: the docs directory lives inside the
/// `fieldmanual` plugin, three levels below the platform root, so the
/// default `paths.root` of `../../..` resolves correctly. The site dir is
/// named `sphinx-docs`, so the `docs/` probe never matches it.
pub struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    /// Creates a platform tree with `app/`, `plugins/`, and the docs
    /// directory at `plugins/fieldmanual/sphinx-docs`.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create sandbox");
        std::fs::create_dir_all(root.path().join("app")).expect("create app dir");
        std::fs::create_dir_all(root.path().join("plugins/fieldmanual/sphinx-docs"))
            .expect("create docs dir");
        Self { root }
    }

    /// Platform root.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Docs directory the build runs from.
    pub fn docs_dir(&self) -> PathBuf {
        self.root.path().join("plugins/fieldmanual/sphinx-docs")
    }

    /// Same, as a `&str` argument for the CLI.
    pub fn docs_arg(&self) -> String {
        self.docs_dir().display().to_string()
    }

    /// Output directory for generated sources.
    pub fn generated_dir(&self) -> PathBuf {
        self.docs_dir().join("_generated")
    }

    /// Creates an empty plugin directory and returns its path.
    pub fn add_plugin(&self, name: &str) -> PathBuf {
        let dir = self.root.path().join("plugins").join(name);
        std::fs::create_dir_all(&dir).expect("create plugin dir");
        dir
    }

    /// Creates a plugin with docs files, given as (relative path, contents).
    pub fn add_plugin_docs(&self, name: &str, files: &[(&str, &str)]) {
        let docs = self.add_plugin(name).join("docs");
        for (rel, contents) in files {
            let dest = docs.join(rel);
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).expect("create docs subdir");
            }
            std::fs::write(dest, contents).expect("write docs file");
        }
    }

    /// Writes one ability file under a plugin's data directory.
    pub fn add_ability_file(&self, plugin: &str, rel: &str, yaml: &str) {
        let dest = self
            .add_plugin(plugin)
            .join("data/abilities")
            .join(rel);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).expect("create abilities subdir");
        }
        std::fs::write(dest, yaml).expect("write ability file");
    }

    /// Writes the site configuration into the docs directory.
    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.docs_dir().join("fieldmanual.yml"), yaml).expect("write config");
    }
}

/// Runs the `fieldmanual` binary with the given arguments.
pub fn run_fieldmanual(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fieldmanual"))
        .args(args)
        .output()
        .expect("failed to run fieldmanual")
}

/// Runs the binary with the given input piped to stdin.
pub fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_fieldmanual"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn fieldmanual");

    {
        use std::io::Write;
        let stdin = child.stdin.as_mut().expect("stdin not captured");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write stdin");
    }

    child.wait_with_output().expect("failed to wait for fieldmanual")
}

/// Captured stdout as UTF-8.
pub fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr as UTF-8.
pub fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
