//! Drives one documentation run end to end.
//!
//! fetch -> parse -> context -> outline -> render -> assemble -> convert ->
//! test skeletons -> review -> regeneration block -> prompts -> cleanup.
//!
//! Only fetching, parsing and writing the markdown document can abort a run.
//! Every later phase records its failure in the report and the run carries on.

use crate::config::{DocgenConfig, OutputFormat};
use crate::context::{load_context, meta_prompt};
use crate::convert::ConversionChain;
use crate::fetch::{repo_name_from_path, repo_name_from_url, DefaultFetcher};
use crate::parse::parse_repository;
use anyhow::{anyhow, Result};
use chrono::Utc;
use repo_docgen_core::assemble::{assemble, summary_report, AssemblyOptions};
use repo_docgen_core::contract::{FetchedSource, RepositoryFetcher, SourceSpec};
use repo_docgen_core::outline::build_outline_with_meta_prompt;
use repo_docgen_core::prompts::build_prompts;
use repo_docgen_core::render::SectionRenderer;
use repo_docgen_core::review::regeneration::{self, RunSummary, TestIntegration};
use repo_docgen_core::review::{ApprovalStatus, QualityScorer};
use repo_docgen_core::testgen;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const DEFAULT_OUTPUT_NAME: &str = "documentation.md";
pub const TESTS_DIR: &str = "tests_generated";

/// Per-run settings, taken from the CLI or from a batch config.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub output_dir: PathBuf,
    /// File name suffix for the main document; `{repo}_documentation.md` when unset.
    pub output_name: Option<String>,
    pub format: OutputFormat,
    pub skip_tests: bool,
    pub skip_review: bool,
    pub prompts_dir: Option<PathBuf>,
}

impl PipelineOptions {
    pub fn from_config(config: &DocgenConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            output_name: None,
            format: config.format,
            skip_tests: config.skip_tests,
            skip_review: config.skip_review,
            prompts_dir: config.prompts_dir.clone(),
        }
    }

    /// `{repo}_{output_name}`, with `.md` appended when missing.
    pub fn document_file_name(&self, repo_name: &str) -> String {
        let name = self.output_name.as_deref().unwrap_or(DEFAULT_OUTPUT_NAME);
        if name.ends_with(".md") {
            format!("{repo_name}_{name}")
        } else {
            format!("{repo_name}_{name}.md")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    pub kind: String,
    pub path: PathBuf,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub run_id: String,
    pub repo_name: String,
    pub success: bool,
    pub errors: Vec<String>,
    pub outputs: Vec<OutputRecord>,
    pub overall_score: Option<f64>,
    pub approval_status: Option<ApprovalStatus>,
}

impl PipelineReport {
    pub fn output(&self, kind: &str) -> Option<&OutputRecord> {
        self.outputs.iter().find(|o| o.kind == kind)
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn fallback_name(source: &SourceSpec) -> String {
    match source {
        SourceSpec::Git(git) => repo_name_from_url(&git.repo_url),
        SourceSpec::Local(local) => repo_name_from_path(&local.path),
    }
}

/// Accumulates outputs and errors while the phases run.
struct Run {
    report: PipelineReport,
    output_dir: PathBuf,
}

impl Run {
    fn new(repo_name: String, output_dir: &Path) -> Self {
        Self {
            report: PipelineReport {
                run_id: Uuid::new_v4().to_string(),
                repo_name,
                success: false,
                errors: Vec::new(),
                outputs: Vec::new(),
                overall_score: None,
                approval_status: None,
            },
            output_dir: output_dir.to_path_buf(),
        }
    }

    fn artifact_path(&self, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}", self.report.repo_name, suffix))
    }

    fn record(&mut self, kind: &str, path: PathBuf, bytes: &[u8]) {
        info!(kind, path = %path.display(), bytes = bytes.len(), "[DOCGEN] Artifact written");
        self.report.outputs.push(OutputRecord {
            kind: kind.to_string(),
            path,
            sha256: sha256_hex(bytes),
        });
    }

    fn write(&mut self, kind: &str, path: PathBuf, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create {}: {e}", parent.display()))?;
        }
        match fs::write(&path, bytes) {
            Ok(()) => {
                self.record(kind, path, bytes);
                Ok(())
            }
            Err(e) => {
                error!(error = ?e, kind, path = %path.display(), "[DOCGEN][ERROR] Failed to write artifact");
                Err(anyhow!("Failed to write {kind} to {}: {e}", path.display()))
            }
        }
    }

    /// Writes an artifact whose failure must not stop the run.
    fn write_soft(&mut self, kind: &str, path: PathBuf, bytes: &[u8]) {
        if let Err(e) = self.write(kind, path, bytes) {
            self.fail_phase(kind, e.to_string());
        }
    }

    fn write_json<T: Serialize>(&mut self, kind: &str, suffix: &str, value: &T) {
        let path = self.artifact_path(suffix);
        match serde_json::to_vec_pretty(value) {
            Ok(bytes) => self.write_soft(kind, path, &bytes),
            Err(e) => self.fail_phase(kind, format!("serialization failed: {e}")),
        }
    }

    fn fail_phase(&mut self, phase: &str, message: String) {
        warn!(phase, error = %message, "[DOCGEN] Phase failed, continuing");
        self.report.errors.push(format!("{phase}: {message}"));
    }

    fn abort(mut self, phase: &str, message: String) -> PipelineReport {
        error!(phase, error = %message, "[DOCGEN][ERROR] Run aborted");
        self.report.errors.push(format!("{phase}: {message}"));
        self.report.success = false;
        self.finish()
    }

    /// Writes `{repo}_report.json` and hands the report back.
    fn finish(mut self) -> PipelineReport {
        let path = self.artifact_path("report.json");
        let written = serde_json::to_vec_pretty(&self.report)
            .map_err(|e| anyhow!("serialization failed: {e}"))
            .and_then(|bytes| {
                fs::create_dir_all(&self.output_dir)?;
                fs::write(&path, &bytes)?;
                Ok(())
            });
        if let Err(e) = written {
            error!(error = %e, path = %path.display(), "[DOCGEN][ERROR] Failed to write run report");
        }
        info!(
            run_id = %self.report.run_id,
            repo_name = %self.report.repo_name,
            success = self.report.success,
            errors = self.report.errors.len(),
            outputs = self.report.outputs.len(),
            "[DOCGEN] Run finished"
        );
        self.report
    }
}

fn cleanup(fetched: &FetchedSource) {
    if !fetched.ephemeral {
        return;
    }
    match fs::remove_dir_all(&fetched.local_path) {
        Ok(()) => debug!(path = %fetched.local_path.display(), "[DOCGEN] Removed working copy"),
        Err(e) => warn!(error = ?e, path = %fetched.local_path.display(), "[DOCGEN] Could not remove working copy"),
    }
}

/// Runs every phase for one source using `fetcher` to obtain the working copy.
pub async fn generate(
    fetcher: &dyn RepositoryFetcher,
    source: &SourceSpec,
    options: &PipelineOptions,
) -> PipelineReport {
    info!(source = %source.describe(), format = %options.format, "[DOCGEN] Starting documentation run");

    // fetch
    let fetched = match fetcher.fetch(source).await {
        Ok(fetched) => fetched,
        Err(e) => {
            return Run::new(fallback_name(source), &options.output_dir).abort("fetch", e.to_string())
        }
    };
    let mut run = Run::new(fetched.name.clone(), &options.output_dir);
    let report = generate_from(&mut run, &fetched, options);
    cleanup(&fetched);
    match report {
        Ok(()) => {
            run.report.success = true;
            run.finish()
        }
        Err((phase, message)) => run.abort(phase, message),
    }
}

fn generate_from(
    run: &mut Run,
    fetched: &FetchedSource,
    options: &PipelineOptions,
) -> std::result::Result<(), (&'static str, String)> {
    // parse
    let repo = parse_repository(&fetched.local_path, Some(&fetched.name))
        .map_err(|e| ("parse", e.to_string()))?;
    info!(
        repo_name = %repo.name,
        files = repo.total_files(),
        primary_language = %repo.primary_language(),
        "[DOCGEN] Repository parsed"
    );

    // context + outline + render
    let context = load_context(options.prompts_dir.as_deref(), &options.output_dir);
    let outline = build_outline_with_meta_prompt(&repo, meta_prompt(&context));
    let document = SectionRenderer::new().render_outline(&outline, &repo, &context);

    // assemble
    let markdown = assemble(&document, &AssemblyOptions::at(Utc::now()));
    let document_name = options.document_file_name(&run.report.repo_name);
    let document_path = options.output_dir.join(&document_name);
    run.write("documentation", document_path.clone(), markdown.as_bytes())
        .map_err(|e| ("assemble", e.to_string()))?;

    run.write_json("outline", "outline.json", &outline);
    run.write_json("sections", "sections.json", &document.sections);
    let summary = summary_report(&document);
    let summary_path = run.artifact_path("summary.md");
    run.write_soft("summary", summary_path, summary.as_bytes());

    // convert
    if let Some(chain) = ConversionChain::for_format(options.format) {
        let stem = document_path.with_extension("");
        match chain.convert(&markdown, &stem) {
            Ok(outcome) => {
                match fs::read(&outcome.path) {
                    Ok(bytes) => run.record(options.format.as_str(), outcome.path.clone(), &bytes),
                    Err(e) => run.fail_phase("convert", format!("converted file unreadable: {e}")),
                }
                if let Some(instructions) = &outcome.instructions {
                    warn!(converter = %outcome.converter, instructions = %instructions, "[DOCGEN] Requested format unavailable");
                    run.report
                        .errors
                        .push(format!("convert: degraded to {}; {instructions}", outcome.converter));
                }
            }
            Err(e) => run.fail_phase("convert", e.to_string()),
        }
    }

    // test skeletons
    let mut test_integration = None;
    if options.skip_tests {
        info!("[DOCGEN] Test generation skipped");
    } else {
        let plan = testgen::generate(&repo);
        let tests_dir = options.output_dir.join(TESTS_DIR);
        let before = run.report.errors.len();
        for file in &plan.files {
            run.write_soft("test", tests_dir.join(&file.path), file.content.as_bytes());
        }
        if run.report.errors.len() == before {
            test_integration = Some(TestIntegration {
                files_generated: plan.files.len(),
                strategy: plan.strategy.as_str().to_string(),
                coverage_target: plan.coverage_target,
            });
        }
    }

    // review + regeneration block
    let summary = RunSummary {
        phase: "v2".to_string(),
        changes: vec![format!(
            "Generated {} sections ({} fallback)",
            document.sections.len(),
            document.fallback_count()
        )],
        errors: run.report.errors.clone(),
        inputs: vec![fetched.origin.describe()],
        outputs: run
            .report
            .outputs
            .iter()
            .map(|o| o.path.display().to_string())
            .collect(),
        sections: document.sections.len(),
        fallback_sections: document.fallback_count(),
        total_words: document.total_words(),
        test_integration,
    };
    let (block, review) = if options.skip_review {
        info!("[DOCGEN] Quality review skipped");
        (regeneration::build(None, &repo, &summary, Utc::now()), None)
    } else {
        let quality = QualityScorer::new().report(&markdown, &repo, &summary, Utc::now());
        run.write_json("review", "review.json", &quality);
        run.report.overall_score = Some(quality.review.overall_score);
        run.report.approval_status = Some(quality.review.approval_status);
        (quality.regeneration_block, Some(quality.review))
    };
    let regeneration_path = run.artifact_path("regeneration.md");
    run.write_soft("regeneration", regeneration_path, block.to_markdown().as_bytes());

    // prompts
    match build_prompts(&repo, &outline, review.as_ref(), &document_name, &markdown) {
        Ok(prompts) => {
            let prompts_path = run.artifact_path("llm_prompts.md");
            run.write_soft("prompts", prompts_path, prompts.as_bytes());
        }
        Err(e) => run.fail_phase("prompts", format!("formatting failed: {e}")),
    }

    Ok(())
}

/// Fetches into a scratch work directory that is removed when the run ends.
pub async fn run_source(source: &SourceSpec, options: &PipelineOptions) -> Result<PipelineReport> {
    let work_dir = tempfile::Builder::new()
        .prefix("repo-docgen-")
        .tempdir()
        .map_err(|e| {
            error!(error = ?e, "[DOCGEN][ERROR] Failed to create work directory");
            anyhow!("Failed to create work directory: {e}")
        })?;
    debug!(work_dir = %work_dir.path().display(), "[DOCGEN] Work directory created");
    let fetcher = DefaultFetcher::new(work_dir.path());
    let report = generate(&fetcher, source, options).await;
    drop(work_dir);
    Ok(report)
}

/// Runs every configured source in order; one failing source does not stop the rest.
pub async fn run_batch(config: &DocgenConfig) -> Result<Vec<PipelineReport>> {
    if config.sources.is_empty() {
        return Err(anyhow!("No sources specified"));
    }
    let options = PipelineOptions::from_config(config);
    let mut reports = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        let report = run_source(source, &options).await?;
        if !report.success {
            error!(source = %source.describe(), errors = ?report.errors, "[DOCGEN][ERROR] Source failed");
        }
        reports.push(report);
    }
    Ok(reports)
}
