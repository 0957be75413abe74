// repo-docgen/src/config.rs

use clap::ValueEnum;
use repo_docgen_core::contract::SourceSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// Format of the primary document beyond the always-written markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
    Pdf,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Pdf => "pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(format!("unsupported output format: {other}")),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// Settings shared by every source of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocgenConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub skip_tests: bool,
    #[serde(default)]
    pub skip_review: bool,
    #[serde(default)]
    pub prompts_dir: Option<PathBuf>,
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: OutputFormat::default(),
            skip_tests: false,
            skip_review: false,
            prompts_dir: None,
            sources: Vec::new(),
        }
    }
}

impl DocgenConfig {
    pub fn trace_loaded(&self) {
        info!(
            output_dir = %self.output_dir.display(),
            format = %self.format,
            skip_tests = self.skip_tests,
            skip_review = self.skip_review,
            sources_count = self.sources.len(),
            "Loaded DocgenConfig"
        );
        for source in &self.sources {
            match source {
                SourceSpec::Git(g) => info!(
                    repo_url = %g.repo_url,
                    reference = g.reference.as_deref().unwrap_or("default branch"),
                    "Loaded git source"
                ),
                SourceSpec::Local(l) => info!(path = %l.path.display(), "Loaded local source"),
            }
        }
        debug!(?self, "Config loaded (full debug)");
    }
}
