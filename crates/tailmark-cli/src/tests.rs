use super::*;

use std::cell::RefCell;
use std::fs;

use camino::Utf8PathBuf;
use insta::assert_snapshot;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Workspace {
    _temp_dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn write(&self, name: &str, contents: &str) -> String {
        let path = self.root.join(name);
        fs::write(&path, contents).expect("write fixture");
        path.into_string()
    }
}

#[fixture]
fn workspace() -> Workspace {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("utf-8 temp dir");
    Workspace {
        _temp_dir: temp_dir,
        root,
    }
}

struct Outcome {
    code: ExitCode,
    stdout: String,
    stderr: String,
}

fn invoke(args: &[&str]) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once("tailmark")
        .chain(args.iter().copied())
        .map(OsString::from);
    let code = run(argv, &mut stdout, &mut stderr);
    Outcome {
        code,
        stdout: String::from_utf8(stdout).expect("stdout utf-8"),
        stderr: String::from_utf8(stderr).expect("stderr utf-8"),
    }
}

#[rstest]
fn decorate_prints_confirmed_spans(workspace: Workspace) {
    let css = workspace.write("app.css", "@utility brand { color: #0070e0; }");
    let html = workspace.write("index.html", "<p class=\"brand grow nope\">hi</p>");

    let outcome = invoke(&["--design-system", &css, "decorate", &html]);

    assert_eq!(outcome.code, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_snapshot!(outcome.stdout.trim_end(), @r#"[{"start":10,"end":15,"text":"brand"},{"start":16,"end":20,"text":"grow"}]"#);
}

#[rstest]
fn hover_prints_the_rendered_rule(workspace: Workspace) {
    let manifest = workspace.write(
        "tailmark.json",
        r#"{ "utilities": { "btn": { "padding": "0.5rem 1rem" } } }"#,
    );
    let html = workspace.write("index.html", "<a class='hover:btn'>");

    let outcome = invoke(&["--design-system", &manifest, "hover", &html, "--offset", "12"]);

    assert_eq!(outcome.code, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_snapshot!(outcome.stdout.trim_end(), @r"
    .hover\:btn:hover {
      padding: 0.5rem 1rem;
    }
    ");
}

#[rstest]
fn hover_outside_any_class_prints_nothing(workspace: Workspace) {
    let css = workspace.write("app.css", "");
    let html = workspace.write("index.html", "<a class='flex'>");

    let outcome = invoke(&["--design-system", &css, "hover", &html, "--offset", "1"]);

    assert_eq!(outcome.code, ExitCode::SUCCESS);
    assert!(outcome.stdout.is_empty());
}

#[rstest]
fn configuration_file_supplies_the_design_system(workspace: Workspace) {
    let css = workspace.write("app.css", "@utility card { border-radius: 0.5rem; }");
    let config = workspace.write("tailmark.toml", &format!("design_system = {css:?}\n"));
    let html = workspace.write("index.html", "'card'");

    let outcome = invoke(&["--config-path", &config, "decorate", &html]);

    assert_eq!(outcome.code, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout.trim(), r#"[{"start":1,"end":5,"text":"card"}]"#);
}

#[rstest]
fn disabled_hover_is_reported(workspace: Workspace) {
    let css = workspace.write("app.css", "");
    let config = workspace.write(
        "tailmark.toml",
        &format!("enable_hover = false\ndesign_system = {css:?}\n"),
    );
    let html = workspace.write("index.html", "'flex'");

    let outcome = invoke(&["--config-path", &config, "hover", &html, "--offset", "2"]);

    assert_eq!(outcome.code, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("hover output is disabled"));
}

#[rstest]
#[case::no_design_system(&[], "no design system configured")]
#[case::broken_stylesheet(&["--design-system", "{root}/broken.css"], "invalid stylesheet at line 1")]
#[case::bad_pattern(&["--config-path", "{root}/patterns.toml"], "invalid inclusion pattern")]
fn failures_are_reported_on_stderr(
    workspace: Workspace,
    #[case] extra: &[&str],
    #[case] expected: &str,
) {
    workspace.write("broken.css", "@utility broken {");
    workspace.write("patterns.toml", "include_patterns = [\"(\"]\n");
    let html = workspace.write("index.html", "'flex'");
    let args: Vec<String> = extra
        .iter()
        .copied()
        .chain(["decorate", html.as_str()])
        .map(|arg| arg.replace("{root}", workspace.root.as_str()))
        .collect();
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

    let outcome = invoke(&arg_refs);

    assert_eq!(outcome.code, ExitCode::FAILURE);
    assert!(outcome.stdout.is_empty());
    assert!(
        outcome.stderr.contains(expected),
        "unexpected stderr: {}",
        outcome.stderr
    );
}

#[rstest]
fn missing_input_file_is_reported(workspace: Workspace) {
    let css = workspace.write("app.css", "");
    let missing = workspace.root.join("absent.html");

    let outcome = invoke(&["--design-system", &css, "decorate", missing.as_str()]);

    assert_eq!(outcome.code, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("absent.html"));
}

#[test]
fn help_goes_to_stdout() {
    let outcome = invoke(&["--help"]);

    assert_eq!(outcome.code, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("Usage: tailmark"));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn usage_errors_go_to_stderr() {
    let outcome = invoke(&["hover", "index.html"]);

    assert_eq!(outcome.code, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("--offset"));
}

#[rstest]
fn configuration_flags_after_the_command_are_usage_errors(workspace: Workspace) {
    let css = workspace.write("app.css", "");
    let html = workspace.write("index.html", "'flex'");

    let outcome = invoke(&["decorate", &html, "--design-system", &css]);

    assert_eq!(outcome.code, ExitCode::FAILURE);
    assert!(outcome.stdout.is_empty());
    assert!(outcome.stderr.contains("--design-system"));
}

#[rstest]
fn explicit_version_overrides_path_inference(workspace: Workspace) {
    let stylesheet = workspace.write("theme.css", "@utility card { border-radius: 0.5rem; }");
    let html = workspace.write("index.html", "'card'");

    let outcome = invoke(&[
        "--design-system",
        &stylesheet,
        "--design-system-version",
        "v3",
        "decorate",
        &html,
    ]);

    assert_eq!(outcome.code, ExitCode::FAILURE);
    assert!(
        outcome.stderr.contains("invalid manifest"),
        "unexpected stderr: {}",
        outcome.stderr
    );
}

/// Records the configuration arguments it receives and answers with a
/// fixed configuration.
struct RecordingLoader {
    config: Config,
    seen: RefCell<Vec<OsString>>,
}

impl ConfigLoader for RecordingLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        self.seen.borrow_mut().extend(args.iter().cloned());
        Ok(self.config.clone())
    }
}

#[rstest]
fn loader_receives_only_the_configuration_prefix(workspace: Workspace) {
    let css = workspace.write("app.css", "@utility brand { color: red; }");
    let html = workspace.write("index.html", "'brand'");
    let loader = RecordingLoader {
        config: Config {
            design_system: Some(Utf8PathBuf::from(css)),
            ..Config::default()
        },
        seen: RefCell::new(Vec::new()),
    };
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = ["tailmark", "--log-format=compact", "decorate", html.as_str()].map(OsString::from);

    let code = run_with_loader(argv, &mut stdout, &mut stderr, &loader);

    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(
        loader.seen.into_inner(),
        ["tailmark", "--log-format=compact"].map(OsString::from)
    );
    assert_eq!(
        String::from_utf8(stdout).expect("stdout utf-8").trim(),
        r#"[{"start":1,"end":6,"text":"brand"}]"#
    );
}
