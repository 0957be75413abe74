use super::with_extension;
use repo_docgen_core::contract::DocumentConverter;
use repo_docgen_core::DocgenError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// PDF engines tried in order.
pub const PDF_ENGINES: [&str; 3] = ["xelatex", "pdflatex", "wkhtmltopdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PandocTarget {
    Html,
    Pdf,
}

/// Shells out to `pandoc`.
pub struct PandocConverter {
    target: PandocTarget,
    program: String,
}

impl PandocConverter {
    pub fn new(target: PandocTarget) -> Self {
        Self::with_program(target, "pandoc")
    }

    /// Uses a different executable, e.g. a wrapper script or a missing binary in tests.
    pub fn with_program(target: PandocTarget, program: impl Into<String>) -> Self {
        Self {
            target,
            program: program.into(),
        }
    }

    fn available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    fn engine_args(engine: &str) -> Vec<String> {
        let mut args = vec![format!("--pdf-engine={engine}"), "--toc".to_string()];
        let vars: &[&str] = if engine == "wkhtmltopdf" {
            &["margin-top=1in", "margin-bottom=1in", "margin-left=1in", "margin-right=1in"]
        } else {
            &["geometry:margin=1in", "fontsize=11pt", "colorlinks=true"]
        };
        for var in vars {
            args.push("-V".to_string());
            args.push(var.to_string());
        }
        args
    }

    fn run(&self, input: &Path, output: &Path, extra: &[String]) -> Result<(), DocgenError> {
        let result = Command::new(&self.program)
            .arg(input)
            .arg("-o")
            .arg(output)
            .arg("--standalone")
            .args(extra)
            .output();
        match result {
            Ok(out) if out.status.success() => Ok(()),
            Ok(out) => Err(DocgenError::conversion(
                "pandoc",
                String::from_utf8_lossy(&out.stderr).trim().to_string(),
            )),
            Err(e) => Err(DocgenError::conversion(
                "pandoc",
                format!("could not launch {}: {e}", self.program),
            )),
        }
    }
}

impl DocumentConverter for PandocConverter {
    fn name(&self) -> &'static str {
        match self.target {
            PandocTarget::Html => "pandoc_html",
            PandocTarget::Pdf => "pandoc_pdf",
        }
    }

    fn convert(&self, markdown: &str, destination_stem: &Path) -> Result<PathBuf, DocgenError> {
        if !self.available() {
            return Err(DocgenError::conversion(
                "pandoc",
                format!("{} is not installed", self.program),
            ));
        }
        let mut input = tempfile::Builder::new()
            .prefix("repo-docgen-")
            .suffix(".md")
            .tempfile()?;
        input.write_all(markdown.as_bytes())?;
        input.flush()?;

        match self.target {
            PandocTarget::Html => {
                let output = with_extension(destination_stem, "html");
                self.run(input.path(), &output, &["--toc".to_string()])?;
                Ok(output)
            }
            PandocTarget::Pdf => {
                let output = with_extension(destination_stem, "pdf");
                let mut last_error = None;
                for engine in PDF_ENGINES {
                    debug!(engine, "Trying pandoc PDF engine");
                    match self.run(input.path(), &output, &Self::engine_args(engine)) {
                        Ok(()) => return Ok(output),
                        Err(e) => {
                            warn!(engine, error = %e, "pandoc PDF engine failed");
                            last_error = Some(e);
                        }
                    }
                }
                Err(last_error
                    .unwrap_or_else(|| DocgenError::conversion("pandoc", "no PDF engine available")))
            }
        }
    }
}
