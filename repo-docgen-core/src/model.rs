//! The parsed-metadata input of the pipeline.
//!
//! Every field defaults, so any JSON object (including `{}`) deserializes into a
//! usable model. Consumers treat an absent value as empty or false.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Facts about one repository, produced by the parser in the binary crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryModel {
    pub path: String,
    pub name: String,
    /// Language name to number of files.
    pub languages: BTreeMap<String, usize>,
    /// Language to dependency file to declared package names.
    pub dependencies: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    pub readme: Readme,
    pub structure: Structure,
    /// Relative paths of every file that was walked.
    pub files: Vec<String>,
    pub config_files: Vec<String>,
    pub entry_points: Vec<String>,
    pub documentation: Vec<String>,
    pub tests: TestInventory,
    pub ci_cd: Vec<String>,
    pub license: Option<String>,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Readme {
    pub found: bool,
    pub filename: Option<String>,
    pub content: String,
    pub sections: Vec<ReadmeSection>,
    pub badges: Vec<String>,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadmeSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Structure {
    pub root_files: Vec<String>,
    /// Top-level directory names.
    pub directories: Vec<String>,
    pub total_files: usize,
    pub max_depth: usize,
    pub tree: Option<TreeNode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    File,
    Directory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestInventory {
    pub directories: Vec<String>,
    pub files: Vec<String>,
    pub frameworks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub total_files: usize,
    pub total_directories: usize,
    pub total_lines: usize,
    pub code_files: usize,
}

impl RepositoryModel {
    /// Name used in headings; "Unknown Project" when the parser found none.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unknown Project"
        } else {
            &self.name
        }
    }

    /// Language with the most files, or "unknown". Ties go to the alphabetically first name.
    pub fn primary_language(&self) -> String {
        self.languages
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(lang, _)| lang.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn has_language(&self, name: &str) -> bool {
        self.languages.keys().any(|l| l.eq_ignore_ascii_case(name))
    }

    /// Every declared package name across all languages and files.
    pub fn dependency_names(&self) -> Vec<&str> {
        self.dependencies
            .values()
            .flat_map(|files| files.values())
            .flat_map(|deps| deps.iter().map(String::as_str))
            .collect()
    }

    /// Dependency names declared for one language key (case-insensitive).
    pub fn dependencies_for(&self, language: &str) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|(lang, _)| lang.eq_ignore_ascii_case(language))
            .flat_map(|(_, files)| files.values())
            .flat_map(|deps| deps.iter().map(String::as_str))
            .collect()
    }

    /// All relative file paths joined into one string for substring heuristics.
    pub fn file_listing(&self) -> String {
        let mut listing = self.files.join("\n");
        for dir in &self.structure.directories {
            listing.push('\n');
            listing.push_str(dir);
            listing.push('/');
        }
        listing
    }

    pub fn total_files(&self) -> usize {
        self.statistics
            .total_files
            .max(self.structure.total_files)
            .max(self.files.len())
    }

    pub fn has_file(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.files
            .iter()
            .chain(self.config_files.iter())
            .any(|f| f.to_lowercase().contains(&needle))
    }
}
