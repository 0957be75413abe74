//! Command-line surface for repo-docgen.
//!
//! `generate` documents one repository given as a URL or a local path.
//! `batch` documents every source listed in a YAML config file.
//!
//! [`run`] holds all the logic so integration tests can call it without
//! spawning the binary; `main` only sets up tracing and the exit code.
use crate::config::OutputFormat;
use crate::load_config::load_config;
use crate::pipeline::{run_batch, run_source, PipelineOptions, PipelineReport};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use repo_docgen_core::contract::SourceSpec;
use std::path::PathBuf;

/// CLI for repo-docgen: generate documentation, reviews and regeneration notes for a repository.
#[derive(Parser)]
#[clap(
    name = "repo-docgen",
    version,
    about = "Generate structured documentation and quality reviews for a source repository"
)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[clap(long, global = true)]
    pub log_json: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Document a single repository
    Generate {
        /// Git URL or local path of the repository
        source: String,
        /// Output file name, prefixed with the repository name
        #[clap(short, long)]
        output: Option<String>,
        /// Directory receiving every artifact
        #[clap(long, default_value = "output")]
        output_dir: PathBuf,
        /// Format of the main document besides markdown
        #[clap(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
        /// Skip generating test skeletons
        #[clap(long)]
        no_tests: bool,
        /// Skip the quality review and regeneration block
        #[clap(long)]
        no_review: bool,
        /// Directory of markdown notes used as AI context
        #[clap(long)]
        prompts_dir: Option<PathBuf>,
        /// Branch, tag or commit to check out for git sources
        #[clap(long)]
        reference: Option<String>,
    },
    /// Document every source listed in the given config file
    Batch {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

fn print_report(report: &PipelineReport) {
    println!(
        "{} [{}]: {}",
        report.repo_name,
        report.run_id,
        if report.success { "success" } else { "failed" }
    );
    if let (Some(score), Some(status)) = (report.overall_score, report.approval_status) {
        println!("  quality: {score:.1}/100 ({status})");
    }
    for output in &report.outputs {
        println!("  {}: {}", output.kind, output.path.display());
    }
    for error in &report.errors {
        eprintln!("  [ERROR] {error}");
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Generate {
            source,
            output,
            output_dir,
            format,
            no_tests,
            no_review,
            prompts_dir,
            reference,
        } => {
            let options = PipelineOptions {
                output_dir,
                output_name: output,
                format,
                skip_tests: no_tests,
                skip_review: no_review,
                prompts_dir,
            };
            let source = SourceSpec::from_argument(&source, reference);
            tracing::info!(command = "generate", source = %source.describe(), "Starting documentation run");
            let report = run_source(&source, &options).await?;
            print_report(&report);
            if report.success {
                Ok(())
            } else {
                Err(anyhow!(
                    "Documentation run failed for {}: {}",
                    report.repo_name,
                    report.errors.join("; ")
                ))
            }
        }
        Commands::Batch { config } => {
            let config = load_config(config)?;
            tracing::info!(command = "batch", sources = config.sources.len(), "Starting batch run");
            let reports = run_batch(&config).await?;
            reports.iter().for_each(print_report);
            let failed: Vec<&str> = reports
                .iter()
                .filter(|r| !r.success)
                .map(|r| r.repo_name.as_str())
                .collect();
            if failed.is_empty() {
                Ok(())
            } else {
                Err(anyhow!("{} of {} sources failed: {}", failed.len(), reports.len(), failed.join(", ")))
            }
        }
    }
}
