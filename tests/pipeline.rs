use repo_docgen::config::{DocgenConfig, OutputFormat};
use repo_docgen::pipeline::{
    generate, run_batch, sha256_hex, PipelineOptions, PipelineReport, TESTS_DIR,
};
use repo_docgen_core::contract::{FetchedSource, LocalSource, MockRepositoryFetcher, SourceSpec};
use repo_docgen_core::DocgenError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_fixture(root: &Path) {
    fs::create_dir_all(root.join("src")).expect("src dir");
    fs::write(
        root.join("README.md"),
        "# Widget\n\nA small service that counts widgets.\n\n## Installation\n\n```bash\npip install -r requirements.txt\n```\n",
    )
    .expect("readme");
    fs::write(root.join("requirements.txt"), "requests==2.31.0\nclick\n").expect("requirements");
    fs::write(
        root.join("main.py"),
        "import click\n\n\n@click.command()\ndef main():\n    print(\"widgets\")\n",
    )
    .expect("main.py");
    fs::write(root.join("src/counter.py"), "def count(items):\n    return len(items)\n").expect("counter.py");
}

fn fixture() -> TempDir {
    let dir = TempDir::new().expect("fixture dir");
    write_fixture(dir.path());
    dir
}

fn options(output_dir: &Path) -> PipelineOptions {
    PipelineOptions {
        output_dir: output_dir.to_path_buf(),
        output_name: None,
        format: OutputFormat::Markdown,
        skip_tests: false,
        skip_review: false,
        prompts_dir: None,
    }
}

fn local_fetcher(path: PathBuf, ephemeral: bool) -> MockRepositoryFetcher {
    let mut fetcher = MockRepositoryFetcher::new();
    fetcher.expect_fetch().times(1).returning(move |source| {
        Ok(FetchedSource {
            name: "widget".to_string(),
            local_path: path.clone(),
            ephemeral,
            origin: source.clone(),
        })
    });
    fetcher
}

fn local_source(path: &Path) -> SourceSpec {
    SourceSpec::Local(LocalSource {
        path: path.to_path_buf(),
    })
}

fn kinds(report: &PipelineReport) -> Vec<&str> {
    report.outputs.iter().map(|o| o.kind.as_str()).collect()
}

#[test]
fn document_file_name_is_prefixed_with_repo() {
    let mut opts = options(Path::new("out"));
    assert_eq!(opts.document_file_name("widget"), "widget_documentation.md");
    opts.output_name = Some("guide".to_string());
    assert_eq!(opts.document_file_name("widget"), "widget_guide.md");
    opts.output_name = Some("guide.md".to_string());
    assert_eq!(opts.document_file_name("widget"), "widget_guide.md");
}

#[test]
fn options_follow_batch_config() {
    let config = DocgenConfig {
        output_dir: PathBuf::from("docs-out"),
        format: OutputFormat::Pdf,
        skip_review: true,
        ..DocgenConfig::default()
    };
    let opts = PipelineOptions::from_config(&config);
    assert_eq!(opts.output_dir, PathBuf::from("docs-out"));
    assert_eq!(opts.format, OutputFormat::Pdf);
    assert!(opts.skip_review);
    assert!(!opts.skip_tests);
    assert!(opts.output_name.is_none());
}

#[tokio::test]
async fn full_run_writes_every_artifact() {
    let repo = fixture();
    let out = TempDir::new().expect("output dir");
    let fetcher = local_fetcher(repo.path().to_path_buf(), false);

    let report = generate(&fetcher, &local_source(repo.path()), &options(out.path())).await;

    assert!(report.success, "errors: {:?}", report.errors);
    assert!(report.errors.is_empty(), "errors: {:?}", report.errors);
    assert_eq!(report.repo_name, "widget");
    assert!(!report.run_id.is_empty());
    for kind in [
        "documentation",
        "outline",
        "sections",
        "summary",
        "test",
        "review",
        "regeneration",
        "prompts",
    ] {
        assert!(kinds(&report).contains(&kind), "missing {kind} in {:?}", kinds(&report));
    }

    let doc = report.output("documentation").expect("documentation record");
    assert_eq!(doc.path, out.path().join("widget_documentation.md"));
    let markdown = fs::read_to_string(&doc.path).expect("document written");
    assert!(markdown.starts_with("# widget"));
    assert!(markdown.contains("## Setup Instructions"));
    assert_eq!(doc.sha256, sha256_hex(markdown.as_bytes()));

    for suffix in [
        "outline.json",
        "sections.json",
        "summary.md",
        "review.json",
        "regeneration.md",
        "llm_prompts.md",
        "report.json",
    ] {
        let path = out.path().join(format!("widget_{suffix}"));
        assert!(path.is_file(), "{} missing", path.display());
    }
    assert!(out.path().join(TESTS_DIR).join("TEST_PLAN.md").is_file());

    let score = report.overall_score.expect("score set");
    assert!((0.0..=100.0).contains(&score));
    assert!(report.approval_status.is_some());

    let review: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.path().join("widget_review.json")).expect("review"),
    )
    .expect("review is json");
    assert!(review.get("regeneration_block").is_some());

    let saved: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.path().join("widget_report.json")).expect("report"),
    )
    .expect("report is json");
    assert_eq!(saved["run_id"], report.run_id.as_str());
    assert_eq!(saved["success"], true);

    // Local working copies are never removed.
    assert!(repo.path().join("main.py").is_file());
}

#[tokio::test]
async fn skip_flags_leave_out_review_and_tests_but_keep_regeneration() {
    let repo = fixture();
    let out = TempDir::new().expect("output dir");
    let fetcher = local_fetcher(repo.path().to_path_buf(), false);
    let mut opts = options(out.path());
    opts.skip_tests = true;
    opts.skip_review = true;
    opts.output_name = Some("guide".to_string());

    let report = generate(&fetcher, &local_source(repo.path()), &opts).await;

    assert!(report.success);
    let kinds = kinds(&report);
    assert!(!kinds.contains(&"test"));
    assert!(!kinds.contains(&"review"));
    assert!(kinds.contains(&"regeneration"));
    assert!(kinds.contains(&"prompts"));
    assert!(report.overall_score.is_none());
    assert!(report.approval_status.is_none());
    assert!(out.path().join("widget_guide.md").is_file());
    assert!(!out.path().join("widget_review.json").exists());

    let block = fs::read_to_string(out.path().join("widget_regeneration.md")).expect("regeneration block");
    assert!(block.contains("**Overall Score:** N/A"));
    assert!(block.contains("**Status:** N/A"));
    assert!(block.contains("- Quality review not available"));
    assert!(block.contains("- Run the quality review to score this document"));
    assert!(!out.path().join(TESTS_DIR).exists());
}

#[tokio::test]
async fn html_format_adds_converted_document() {
    let repo = fixture();
    let out = TempDir::new().expect("output dir");
    let fetcher = local_fetcher(repo.path().to_path_buf(), false);
    let mut opts = options(out.path());
    opts.format = OutputFormat::Html;
    opts.skip_tests = true;

    let report = generate(&fetcher, &local_source(repo.path()), &opts).await;

    assert!(report.success, "errors: {:?}", report.errors);
    let html = report.output("html").expect("html record");
    assert_eq!(html.path, out.path().join("widget_documentation.html"));
    assert!(html.path.is_file());
    assert!(report.output("documentation").is_some());
}

#[tokio::test]
async fn fetch_failure_is_reported_not_raised() {
    let out = TempDir::new().expect("output dir");
    let mut fetcher = MockRepositoryFetcher::new();
    fetcher
        .expect_fetch()
        .returning(|_| Err(DocgenError::Fetch("network down".to_string())));
    let source = SourceSpec::from_argument("https://github.com/acme/widget.git", None);

    let report = generate(&fetcher, &source, &options(out.path())).await;

    assert!(!report.success);
    assert_eq!(report.repo_name, "acme_widget");
    assert!(report.outputs.is_empty());
    assert!(report.errors[0].starts_with("fetch:"));
    assert!(report.errors[0].contains("network down"));
    assert!(out.path().join("acme_widget_report.json").is_file());
}

#[tokio::test]
async fn ephemeral_working_copy_is_removed() {
    let scratch = TempDir::new().expect("scratch dir");
    let clone = scratch.path().join("git_clone");
    write_fixture(&clone);
    let out = TempDir::new().expect("output dir");
    let fetcher = local_fetcher(clone.clone(), true);
    let source = SourceSpec::from_argument("https://example.org/widget.git", None);

    let report = generate(&fetcher, &source, &options(out.path())).await;

    assert!(report.success, "errors: {:?}", report.errors);
    assert!(!clone.exists());
}

#[tokio::test]
async fn batch_requires_sources() {
    let err = run_batch(&DocgenConfig::default()).await.unwrap_err();
    assert!(err.to_string().contains("No sources specified"));
}

#[tokio::test]
async fn batch_continues_after_failed_source() {
    let root = TempDir::new().expect("root");
    let repo = root.path().join("widget");
    write_fixture(&repo);
    let config = DocgenConfig {
        output_dir: root.path().join("out"),
        skip_tests: true,
        sources: vec![
            local_source(&root.path().join("missing")),
            local_source(&repo),
        ],
        ..DocgenConfig::default()
    };

    let reports = run_batch(&config).await.expect("batch runs");

    assert_eq!(reports.len(), 2);
    assert!(!reports[0].success);
    assert_eq!(reports[0].repo_name, "missing");
    assert!(reports[1].success, "errors: {:?}", reports[1].errors);
    assert!(root.path().join("out/widget_documentation.md").is_file());
}
