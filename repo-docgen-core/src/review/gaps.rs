use super::scoring::{
    count_present, fence_count, has_links, header_count,
    malformed_link_count, ACCESSIBILITY_WORDS,
};
use super::{ContentGap, Severity, TechnicalIssue, UsabilityFeedback};
use crate::model::RepositoryModel;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const ESSENTIAL_SECTIONS: &[(&str, &[&str], Severity)] = &[
    ("installation", &["install", "setup", "requirements"], Severity::High),
    ("usage", &["usage", "how to", "getting started"], Severity::High),
    ("api_documentation", &["api", "methods", "functions"], Severity::Medium),
    ("examples", &["example", "demo", "sample"], Severity::Medium),
    ("contributing", &["contribut", "development", "pull request"], Severity::Medium),
    ("license", &["license", "copyright"], Severity::Medium),
    ("changelog", &["changelog", "version", "release"], Severity::Medium),
];

const LANGUAGE_REQUIREMENTS: &[(&str, &[&str])] = &[
    ("python", &["requirements.txt", "pip install", "virtual environment"]),
    ("javascript", &["package.json", "npm install", "node_modules"]),
    ("java", &["maven", "gradle", "classpath"]),
    ("go", &["go mod", "go get", "go build"]),
    ("rust", &["cargo", "crates.io", "cargo.toml"]),
];

const ACTIONABILITY_WORDS: [&str; 7] = ["install", "run", "execute", "configure", "setup", "create", "build"];

const PLACEHOLDER_LINK_TERMS: [&str; 4] = ["example.com", "your-repo", "your-username", "placeholder"];

/// Coarse project category the gap checks key their expectations on.
///
/// Inferred from file names alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    WebApplication,
    PythonLibrary,
    JavaApplication,
    RustProject,
    General,
}

impl ProjectCategory {
    pub fn infer(repo: &RepositoryModel) -> Self {
        let listing = repo.files.join(" ").to_lowercase();
        let any_of = |indicators: &[&str]| indicators.iter().any(|i| listing.contains(i));
        if any_of(&["package.json", "index.html", "app.js"]) {
            ProjectCategory::WebApplication
        } else if any_of(&["setup.py", "__init__.py", "requirements.txt"]) {
            ProjectCategory::PythonLibrary
        } else if any_of(&["pom.xml", "build.gradle"]) {
            ProjectCategory::JavaApplication
        } else if listing.contains("cargo.toml") {
            ProjectCategory::RustProject
        } else {
            ProjectCategory::General
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::WebApplication => "web_application",
            ProjectCategory::PythonLibrary => "python_library",
            ProjectCategory::JavaApplication => "java_application",
            ProjectCategory::RustProject => "rust_project",
            ProjectCategory::General => "general",
        }
    }

    /// Topics a document for this category is expected to mention.
    pub fn requirements(&self) -> &'static [&'static str] {
        match self {
            ProjectCategory::WebApplication => &["deployment", "environment variables", "browser support"],
            ProjectCategory::PythonLibrary => &["pypi", "packaging", "testing"],
            ProjectCategory::JavaApplication => &["build instructions", "dependencies", "jvm requirements"],
            ProjectCategory::RustProject => &["cargo commands", "rust version", "compilation"],
            ProjectCategory::General => &[],
        }
    }
}

/// Categories whose keywords are all absent, then one gap per missing language
/// or project-category requirement.
pub fn content_gaps(document: &str, primary_language: &str, category: ProjectCategory) -> Vec<ContentGap> {
    let lower = document.to_lowercase();
    let mut gaps: Vec<ContentGap> = ESSENTIAL_SECTIONS
        .iter()
        .filter(|(_, keywords, _)| count_present(&lower, keywords) == 0)
        .map(|(section, _, severity)| ContentGap {
            kind: "missing_section".to_string(),
            section: section.to_string(),
            severity: *severity,
            description: format!("No {} information found", section.replace('_', " ")),
        })
        .collect();

    let language = primary_language.to_lowercase();
    let language_requirements = LANGUAGE_REQUIREMENTS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, requirements)| *requirements)
        .unwrap_or_default();
    gaps.extend(
        language_requirements
            .iter()
            .filter(|requirement| !lower.contains(*requirement))
            .map(|requirement| ContentGap {
                kind: "language_specific".to_string(),
                section: format!("{language}_requirements"),
                severity: Severity::Medium,
                description: format!("Missing {language}-specific information about {requirement}"),
            }),
    );

    let name = category.as_str();
    gaps.extend(
        category
            .requirements()
            .iter()
            .filter(|requirement| !lower.contains(*requirement))
            .map(|requirement| ContentGap {
                kind: "project_type_specific".to_string(),
                section: format!("{name}_{requirement}"),
                severity: Severity::Medium,
                description: format!("Missing {name} information about {requirement}"),
            }),
    );
    gaps
}

fn link_target_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[^\]]*\]\(([^)]*)\)").ok()).as_ref()
}

/// Opening fences that carry no language tag.
fn untagged_code_blocks(document: &str) -> usize {
    let mut inside = false;
    let mut untagged = 0;
    for line in document.lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("```") {
            if !inside && rest.trim().is_empty() {
                untagged += 1;
            }
            inside = !inside;
        }
    }
    untagged
}

pub fn technical_issues(document: &str) -> Vec<TechnicalIssue> {
    let mut issues = Vec::new();

    if fence_count(document) % 2 != 0 {
        issues.push(TechnicalIssue {
            kind: "markdown_syntax".to_string(),
            severity: Severity::High,
            description: "Unbalanced code fences".to_string(),
            recommendation: "Close every ``` block".to_string(),
        });
    }

    let malformed = malformed_link_count(document);
    if malformed > 0 {
        issues.push(TechnicalIssue {
            kind: "markdown_syntax".to_string(),
            severity: Severity::Medium,
            description: format!("{malformed} malformed links"),
            recommendation: "Remove whitespace from link targets".to_string(),
        });
    }

    let placeholder_links = link_target_regex()
        .map(|re| {
            re.captures_iter(document)
                .filter_map(|c| c.get(1))
                .filter(|target| {
                    let target = target.as_str().to_lowercase();
                    PLACEHOLDER_LINK_TERMS.iter().any(|t| target.contains(t))
                })
                .count()
        })
        .unwrap_or(0);
    if placeholder_links > 0 {
        issues.push(TechnicalIssue {
            kind: "placeholder_link".to_string(),
            severity: Severity::Medium,
            description: format!("{placeholder_links} links point at placeholder targets"),
            recommendation: "Replace placeholder URLs with real project links".to_string(),
        });
    }

    let untagged = untagged_code_blocks(document);
    if untagged > 0 {
        issues.push(TechnicalIssue {
            kind: "code_language".to_string(),
            severity: Severity::Low,
            description: format!("{untagged} code blocks without a language tag"),
            recommendation: "Tag code blocks (```bash, ```python, ...) for highlighting".to_string(),
        });
    }
    issues
}

/// Words over `.`-separated fragments, counting the empty ones.
fn words_per_fragment(document: &str) -> f64 {
    let words = document.split_whitespace().count();
    let fragments = document.split('.').count();
    words as f64 / fragments.max(1) as f64
}

pub fn usability_feedback(document: &str) -> UsabilityFeedback {
    let lower = document.to_lowercase();

    let mut navigation: f64 = 0.0;
    if header_count(document) >= 3 {
        navigation += 50.0;
    }
    if lower.contains("table of contents") || lower.contains("toc") {
        navigation += 30.0;
    }
    if has_links(document) {
        navigation += 20.0;
    }

    let readability: f64 = match words_per_fragment(document) {
        avg if avg > 25.0 => 70.0,
        avg if avg > 20.0 => 85.0,
        _ => 100.0,
    };

    let actionability = (count_present(&lower, &ACTIONABILITY_WORDS) as f64 * 15.0).min(100.0);

    let accessibility: f64 = if count_present(&lower, &ACCESSIBILITY_WORDS) > 0 {
        80.0
    } else {
        60.0
    };

    UsabilityFeedback {
        navigation: navigation.min(100.0),
        readability,
        actionability,
        accessibility,
    }
}
