//! Conversion of the assembled markdown into HTML or PDF.
//!
//! Converters form an ordered chain that is tried until one succeeds. A PDF
//! request that can only be satisfied with HTML is reported as degraded, along
//! with instructions for printing it manually.

pub mod html;
pub mod pandoc;
pub mod pdf;

pub use html::StyledHtmlConverter;
pub use pandoc::{PandocConverter, PandocTarget};
pub use pdf::NativePdfConverter;

use crate::config::OutputFormat;
use repo_docgen_core::contract::DocumentConverter;
use repo_docgen_core::DocgenError;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const PRINT_TO_PDF_INSTRUCTIONS: &str = "Open the HTML file in a browser and use 'Print to PDF'";

/// What the chain produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionOutcome {
    pub path: PathBuf,
    pub converter: String,
    /// Set when the file is not in the requested format.
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// `stem` with `.ext` appended, leaving any dots already in the stem alone.
pub fn with_extension(stem: &Path, ext: &str) -> PathBuf {
    let mut name: OsString = stem.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

pub struct ConversionChain {
    target: OutputFormat,
    converters: Vec<Box<dyn DocumentConverter>>,
}

impl ConversionChain {
    pub fn new(target: OutputFormat, converters: Vec<Box<dyn DocumentConverter>>) -> Self {
        Self { target, converters }
    }

    /// The default chain for a format; markdown needs no conversion.
    pub fn for_format(target: OutputFormat) -> Option<Self> {
        let converters: Vec<Box<dyn DocumentConverter>> = match target {
            OutputFormat::Markdown => return None,
            OutputFormat::Html => vec![
                Box::new(PandocConverter::new(PandocTarget::Html)),
                Box::new(StyledHtmlConverter),
            ],
            OutputFormat::Pdf => vec![
                Box::new(PandocConverter::new(PandocTarget::Pdf)),
                Box::new(NativePdfConverter::default()),
                Box::new(StyledHtmlConverter),
            ],
        };
        Some(Self::new(target, converters))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    pub fn convert(&self, markdown: &str, stem: &Path) -> Result<ConversionOutcome, DocgenError> {
        let mut failures = Vec::new();
        for converter in &self.converters {
            match converter.convert(markdown, stem) {
                Ok(path) => {
                    let produced = path
                        .extension()
                        .map(|e| e.to_string_lossy().to_lowercase())
                        .unwrap_or_default();
                    let degraded = produced != self.target.extension();
                    let instructions = (degraded && produced == "html")
                        .then(|| PRINT_TO_PDF_INSTRUCTIONS.to_string());
                    info!(
                        converter = converter.name(),
                        path = %path.display(),
                        degraded,
                        "Document converted"
                    );
                    return Ok(ConversionOutcome {
                        path,
                        converter: converter.name().to_string(),
                        degraded,
                        instructions,
                    });
                }
                Err(e) => {
                    warn!(converter = converter.name(), error = %e, "Converter failed, trying next");
                    failures.push(format!("{}: {e}", converter.name()));
                }
            }
        }
        Err(DocgenError::conversion(
            "chain",
            if failures.is_empty() {
                "no converters configured".to_string()
            } else {
                failures.join("; ")
            },
        ))
    }
}
