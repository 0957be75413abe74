//! Error types for the documentation core.

use thiserror::Error;

/// Errors raised at the few fallible seams of the pipeline.
///
/// Missing repository data is never an error; stages fall back to defaults.
#[derive(Error, Debug)]
pub enum DocgenError {
    /// A render strategy failed for one section
    #[error("Rendering section '{section}' failed: {reason}")]
    Render { section: String, reason: String },

    /// Serialization of an artifact failed
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A document converter could not produce its output
    #[error("Conversion with {converter} failed: {reason}")]
    Conversion { converter: String, reason: String },

    /// Obtaining the repository failed
    #[error("Fetching repository failed: {0}")]
    Fetch(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocgenError {
    pub fn render(section: impl Into<String>, reason: impl Into<String>) -> Self {
        DocgenError::Render {
            section: section.into(),
            reason: reason.into(),
        }
    }

    pub fn conversion(converter: impl Into<String>, reason: impl Into<String>) -> Self {
        DocgenError::Conversion {
            converter: converter.into(),
            reason: reason.into(),
        }
    }
}
