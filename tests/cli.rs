use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{create_dir_all, write};
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

/// Lays out a tiny Python project the CLI can document.
fn create_fixture_repo(root: &Path) {
    create_dir_all(root.join("app")).expect("Creating fixture dirs failed");
    write(root.join("README.md"), "# Gadget\n\nTracks gadgets.\n").expect("Writing README failed");
    write(root.join("requirements.txt"), "click\n").expect("Writing requirements failed");
    write(root.join("app/main.py"), "def main():\n    return 1\n").expect("Writing main.py failed");
}

#[test]
fn generate_cli_happy_flow_writes_documentation() {
    let root = TempDir::new().expect("Creating temp dir failed");
    let repo = root.path().join("gadget");
    create_fixture_repo(&repo);
    let out = root.path().join("out");

    let mut cmd = Command::cargo_bin("repo-docgen").expect("Binary exists");
    cmd.arg("generate")
        .arg(&repo)
        .arg("--output-dir")
        .arg(&out)
        .arg("--no-tests")
        .env_remove("DOCGEN_OUTPUT_DIR")
        .env_remove("DOCGEN_FORMAT");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gadget [").and(predicate::str::contains("success")))
        .stdout(predicate::str::contains("quality:"));

    assert!(out.join("gadget_documentation.md").is_file());
    assert!(out.join("gadget_report.json").is_file());
}

#[test]
fn generate_cli_fails_for_missing_path() {
    let root = TempDir::new().expect("Creating temp dir failed");

    let mut cmd = Command::cargo_bin("repo-docgen").expect("Binary exists");
    cmd.arg("generate")
        .arg(root.path().join("does-not-exist"))
        .arg("--output-dir")
        .arg(root.path().join("out"));

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("failed"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn batch_cli_rejects_config_without_sources() {
    let config = NamedTempFile::new().expect("Creating temp config file failed");
    write(config.path(), b"output_dir: ./tmp\nsources: []\n").expect("Writing temp config failed");

    let mut cmd = Command::cargo_bin("repo-docgen").expect("Binary exists");
    cmd.arg("batch")
        .arg("--config")
        .arg(config.path())
        .env_remove("DOCGEN_OUTPUT_DIR")
        .env_remove("DOCGEN_FORMAT");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No sources specified"));
}

#[test]
fn rejects_unknown_format() {
    let mut cmd = Command::cargo_bin("repo-docgen").expect("Binary exists");
    cmd.args(["generate", ".", "--format", "docx"]);
    cmd.assert().failure().stderr(predicate::str::contains("docx"));
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(format!("{:?}", event));
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector { events: events.clone() };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use repo_docgen::cli::{run, Cli, Commands};
    use repo_docgen::config::OutputFormat;

    let out = TempDir::new().expect("Creating temp dir failed");
    let cli = Cli {
        log_json: false,
        command: Commands::Generate {
            source: out.path().join("missing-repo").display().to_string(),
            output: None,
            output_dir: out.path().to_path_buf(),
            format: OutputFormat::Markdown,
            no_tests: true,
            no_review: true,
            prompts_dir: None,
            reference: None,
        },
    };

    let result = run(cli).await;
    assert!(result.is_err());

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
