mod common;

use common::{run_fieldmanual, run_with_stdin, stderr_str, stdout_str, Sandbox};

// ============================================================================
// version command
// ============================================================================

#[test]
fn version_human() {
    let output = run_fieldmanual(&["version"]);
    assert!(
        output.status.success(),
        "version should exit 0: {}",
        stderr_str(&output)
    );
    let stdout = stdout_str(&output);
    assert!(
        stdout.starts_with("fieldmanual "),
        "unexpected version line: {stdout}"
    );
}

#[test]
fn version_json() {
    let output = run_fieldmanual(&["version", "--format", "json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout_str(&output)).expect("output should be valid JSON");
    assert_eq!(parsed["name"], "fieldmanual");
    assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));
}

// ============================================================================
// completions / usage
// ============================================================================

#[test]
fn completions_bash() {
    let output = run_fieldmanual(&["completions", "bash"]);
    assert!(output.status.success());
    let stdout = stdout_str(&output);
    assert!(
        stdout.contains("fieldmanual"),
        "completion script should mention the binary: {stdout}"
    );
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let output = run_fieldmanual(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn help_exits_zero() {
    let output = run_fieldmanual(&["--help"]);
    assert!(output.status.success());
}

// ============================================================================
// highlight command
// ============================================================================

#[test]
fn highlight_spans_format() {
    let output = run_fieldmanual(&["highlight", "whoami --all"]);
    assert!(output.status.success());
    let stdout = stdout_str(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "keyword\twhoami");
    assert_eq!(lines[1], "text\t ");
    assert_eq!(lines[2], "argument\t--all");
}

#[test]
fn highlight_html_format() {
    let output = run_fieldmanual(&["highlight", "--format", "html", r#"run "payload.exe""#]);
    assert!(output.status.success());
    let stdout = stdout_str(&output);
    assert!(stdout.contains(r#"<span class="k">run</span>"#), "{stdout}");
    assert!(
        stdout.contains(r#"<span class="s">&quot;payload.exe&quot;</span>"#),
        "{stdout}"
    );
}

#[test]
fn highlight_json_concat_reproduces_input() {
    let input = "sc query # check services";
    let output = run_fieldmanual(&["highlight", "--format", "json", input]);
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout_str(&output)).expect("output should be valid JSON");
    let spans = parsed.as_array().expect("JSON output should be an array");
    let concat: String = spans
        .iter()
        .map(|span| span["text"].as_str().unwrap())
        .collect();
    assert_eq!(concat, input);
}

#[test]
fn highlight_reads_stdin() {
    let output = run_with_stdin(&["highlight"], "whoami\n");
    assert!(output.status.success());
    let stdout = stdout_str(&output);
    assert!(stdout.starts_with("keyword\twhoami"), "{stdout}");
}

#[test]
fn highlight_empty_stdin() {
    let output = run_fieldmanual(&["highlight"]);
    assert!(output.status.success());
    assert!(stdout_str(&output).is_empty());
}

// ============================================================================
// configuration errors
// ============================================================================

#[test]
fn malformed_config_is_config_error() {
    let sandbox = Sandbox::new();
    sandbox.write_config("project: [unterminated\n");
    let output = run_fieldmanual(&["plugins", "list", "--docs-dir", &sandbox.docs_arg()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr_str(&output).contains("error:"),
        "stderr should carry the error message"
    );
}

#[test]
fn explicit_config_must_exist() {
    let sandbox = Sandbox::new();
    let missing = sandbox.docs_dir().join("absent.yml");
    let output = run_fieldmanual(&[
        "plugins",
        "list",
        "--docs-dir",
        &sandbox.docs_arg(),
        "--config",
        missing.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
}
