//! # contract: data passed between pipeline stages, and the external seams
//!
//! Plain data types flow from one stage to the next: a [`SectionDescriptor`]
//! list inside an [`Outline`], then a [`RenderedDocument`] of
//! [`RenderedSection`]s. Nothing here holds state across runs.
//!
//! Two traits mark the places where the pipeline leaves pure code:
//! - [`RepositoryFetcher`] obtains a working copy of a repository.
//! - [`DocumentConverter`] turns assembled markdown into HTML or PDF.
//!
//! Both are annotated for `mockall` so callers can script them in tests.

use crate::error::DocgenError;
use crate::project_type::{OutlineComplexity, ProjectType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Section priority. Declaration order is the sort order: high first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One planned section of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub title: String,
    pub priority: Priority,
    pub required: bool,
    pub description: String,
    #[serde(default)]
    pub subsections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineMetadata {
    pub project_name: String,
    pub primary_language: String,
    pub project_type: ProjectType,
    pub complexity: OutlineComplexity,
    pub total_sections: usize,
    pub required_sections: usize,
}

/// Ordered section plan plus one prompt per section title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub project_name: String,
    pub sections: Vec<SectionDescriptor>,
    pub metadata: OutlineMetadata,
    pub prompts: BTreeMap<String, String>,
}

impl Outline {
    pub fn section(&self, title: &str) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }
}

/// Markdown produced for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSection {
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub required: bool,
    pub description: String,
    pub word_count: usize,
    pub fallback_used: bool,
    /// Name of the strategy that produced `content`.
    pub strategy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Rendered sections in outline order, one per descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub project_name: String,
    pub metadata: OutlineMetadata,
    pub sections: Vec<RenderedSection>,
}

impl RenderedDocument {
    pub fn get(&self, title: &str) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn total_words(&self) -> usize {
        self.sections.iter().map(|s| s.word_count).sum()
    }

    pub fn fallback_count(&self) -> usize {
        self.sections.iter().filter(|s| s.fallback_used).count()
    }
}

/// Documents from earlier runs and project notes that can colour rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiContext {
    /// File name to contents.
    pub project_docs: BTreeMap<String, String>,
    /// File names of previously generated documents.
    pub past_outputs: Vec<String>,
}

impl AiContext {
    pub fn is_empty(&self) -> bool {
        self.project_docs.is_empty() && self.past_outputs.is_empty()
    }
}

/// Where a repository comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceSpec {
    Git(GitSource),
    Local(LocalSource),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitSource {
    pub repo_url: String,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSource {
    pub path: PathBuf,
}

impl SourceSpec {
    /// Treats anything that looks like a URL or scp-style git address as git.
    pub fn from_argument(source: &str, reference: Option<String>) -> Self {
        let looks_remote = source.starts_with("http://")
            || source.starts_with("https://")
            || source.starts_with("git@")
            || source.starts_with("ssh://");
        if looks_remote {
            SourceSpec::Git(GitSource {
                repo_url: source.to_string(),
                reference,
            })
        } else {
            SourceSpec::Local(LocalSource {
                path: PathBuf::from(source),
            })
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SourceSpec::Git(git) => git.repo_url.clone(),
            SourceSpec::Local(local) => local.path.display().to_string(),
        }
    }
}

/// A working copy ready for parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSource {
    pub name: String,
    pub local_path: PathBuf,
    /// Set when the working copy was created by the fetcher and should be removed afterwards.
    pub ephemeral: bool,
    pub origin: SourceSpec,
}

/// Obtains a local working copy for a source.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    async fn fetch(&self, source: &SourceSpec) -> Result<FetchedSource, DocgenError>;
}

/// One step of the conversion fallback chain.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait DocumentConverter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Writes the converted document next to `destination_stem` and returns its path.
    fn convert(&self, markdown: &str, destination_stem: &Path) -> Result<PathBuf, DocgenError>;
}
