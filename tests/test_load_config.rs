use repo_docgen::config::OutputFormat;
use repo_docgen::load_config::{load_config, FORMAT_ENV, OUTPUT_DIR_ENV};
use repo_docgen_core::contract::SourceSpec;
use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const CONFIG_YAML: &str = r#"
output_dir: ./tmp/docs
format: html
skip_tests: true
prompts_dir: ./prompts
sources:
  - type: git
    repo_url: "https://github.com/example/repo.git"
    reference: main
  - type: local
    path: ../checkouts/widget
"#;

fn config_file(contents: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("temp file");
    write(file.path(), contents).expect("write config");
    file
}

fn clear_env() {
    env::remove_var(OUTPUT_DIR_ENV);
    env::remove_var(FORMAT_ENV);
}

/// A complete file parses into every field, with both source kinds.
#[tokio::test]
#[serial]
async fn test_load_config_reads_all_fields() {
    clear_env();
    let file = config_file(CONFIG_YAML);

    let config = load_config(file.path()).expect("Config should load");

    assert_eq!(config.output_dir, PathBuf::from("./tmp/docs"));
    assert_eq!(config.format, OutputFormat::Html);
    assert!(config.skip_tests);
    assert!(!config.skip_review);
    assert_eq!(config.prompts_dir, Some(PathBuf::from("./prompts")));
    assert_eq!(config.sources.len(), 2);
    match &config.sources[0] {
        SourceSpec::Git(g) => {
            assert_eq!(g.repo_url, "https://github.com/example/repo.git");
            assert_eq!(g.reference.as_deref(), Some("main"));
        }
        other => panic!("expected git source, got {other:?}"),
    }
    match &config.sources[1] {
        SourceSpec::Local(l) => assert_eq!(l.path, PathBuf::from("../checkouts/widget")),
        other => panic!("expected local source, got {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn test_load_config_defaults_for_minimal_file() {
    clear_env();
    let file = config_file("sources: []\n");

    let config = load_config(file.path()).expect("Config should load");

    assert_eq!(config.output_dir, PathBuf::from("output"));
    assert_eq!(config.format, OutputFormat::Markdown);
    assert!(config.sources.is_empty());
    assert!(config.prompts_dir.is_none());
}

/// Environment variables win over the file.
#[tokio::test]
#[serial]
async fn test_load_config_applies_env_overrides() {
    clear_env();
    env::set_var(OUTPUT_DIR_ENV, "/var/tmp/docgen");
    env::set_var(FORMAT_ENV, "PDF");
    let file = config_file(CONFIG_YAML);

    let config = load_config(file.path()).expect("Config should load");
    clear_env();

    assert_eq!(config.output_dir, PathBuf::from("/var/tmp/docgen"));
    assert_eq!(config.format, OutputFormat::Pdf);
}

#[tokio::test]
#[serial]
async fn test_load_config_errors_on_invalid_format_env() {
    clear_env();
    env::set_var(FORMAT_ENV, "docx");
    let file = config_file(CONFIG_YAML);

    let err = load_config(file.path()).unwrap_err();
    clear_env();

    let msg = err.to_string();
    assert!(msg.contains(FORMAT_ENV), "Must name the variable, got: {msg}");
    assert!(msg.contains("docx"), "Must name the value, got: {msg}");
}

/// If the config file is not valid YAML, load_config errors and reports as such.
#[tokio::test]
#[serial]
async fn test_load_config_errors_for_invalid_file() {
    clear_env();
    let file = config_file("not-yaml: [:::");

    let msg = load_config(file.path()).unwrap_err().to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[tokio::test]
#[serial]
async fn test_load_config_errors_for_unknown_source_type() {
    clear_env();
    let file = config_file("sources:\n  - type: svn\n    url: svn://example.org/repo\n");

    let msg = load_config(file.path()).unwrap_err().to_string();
    assert!(msg.contains("Failed to parse config YAML"), "got: {msg}");
}

#[tokio::test]
#[serial]
async fn test_load_config_errors_for_missing_file() {
    clear_env();
    let msg = load_config("/definitely/not/here/docgen.yaml")
        .unwrap_err()
        .to_string();
    assert!(msg.contains("Failed to read config file"), "got: {msg}");
}
