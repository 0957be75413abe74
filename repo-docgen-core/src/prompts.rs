//! Prompt scaffold written next to the generated documentation.
//!
//! The scaffold holds three copy-paste prompts for an external assistant. Nothing
//! here calls a model.

use crate::contract::Outline;
use crate::model::RepositoryModel;
use crate::review::Review;
use std::fmt::{self, Write};

const BOILERPLATE_HEADINGS: &[&str] = &[
    "installation",
    "install",
    "license",
    "contributing",
    "contributors",
    "changelog",
    "table of contents",
    "contents",
    "getting started",
    "usage",
    "support",
    "authors",
    "acknowledgements",
    "acknowledgments",
];

const DOCUMENT_FEATURES: &[(&[&str], &str)] = &[
    (&["api"], "REST API"),
    (&["database"], "Database integration"),
    (&["auth", "login"], "Authentication"),
    (&["frontend", "web "], "Web interface"),
    (&["cli", "command line", "command-line"], "Command-line interface"),
    (&["mobile"], "Mobile support"),
];

const SAMPLE_CHARS: usize = 1000;

/// Feature names taken from README headings, falling back to document keywords.
pub fn extract_features(repo: &RepositoryModel, document: &str) -> Vec<String> {
    let mut features: Vec<String> = repo
        .readme
        .sections
        .iter()
        .map(|s| s.title.trim().to_string())
        .filter(|t| !t.is_empty())
        .filter(|t| !BOILERPLATE_HEADINGS.contains(&t.to_lowercase().as_str()))
        .filter(|t| !t.eq_ignore_ascii_case(repo.display_name()))
        .collect();
    features.dedup();

    if features.is_empty() {
        let lower = document.to_lowercase();
        features = DOCUMENT_FEATURES
            .iter()
            .filter(|(words, _)| words.iter().any(|w| lower.contains(w)))
            .map(|(_, feature)| feature.to_string())
            .collect();
    }
    features.truncate(8);
    features
}

/// Short phrase describing what the project is.
pub fn project_purpose(document: &str) -> &'static str {
    let lower = document.to_lowercase();
    if lower.contains("rest api") || lower.contains("endpoint") {
        "a REST API application"
    } else if lower.contains("frontend") {
        "a web frontend application"
    } else if lower.contains("command-line") || lower.contains("cli ") {
        "a command-line tool"
    } else if lower.contains("library") {
        "a software library"
    } else if lower.contains("framework") {
        "a software framework"
    } else {
        "a software project"
    }
}

fn maturity(review: Option<&Review>) -> &'static str {
    match review.map(|r| r.overall_score) {
        None => "Unknown",
        Some(score) if score >= 85.0 => "Mature",
        Some(score) if score >= 70.0 => "Developing",
        Some(_) => "Initial",
    }
}

fn sample(document: &str) -> String {
    if document.chars().count() > SAMPLE_CHARS {
        let head: String = document.chars().take(SAMPLE_CHARS).collect();
        format!("{head}...")
    } else {
        document.to_string()
    }
}

/// Renders the scaffold markdown for `{repo}_llm_prompts.md`.
pub fn build_prompts(
    repo: &RepositoryModel,
    outline: &Outline,
    review: Option<&Review>,
    document_file: &str,
    document: &str,
) -> Result<String, fmt::Error> {
    let name = repo.display_name();
    let meta = &outline.metadata;
    let features = extract_features(repo, document);
    let feature_list = if features.is_empty() {
        "Core application functionality".to_string()
    } else {
        features.join(", ")
    };
    let purpose = project_purpose(document);
    let language = &meta.primary_language;
    let project_type = meta.project_type.title();
    let sections = outline.titles().join(", ");

    let mut out = String::new();
    writeln!(out, "# Assistant Prompts for {name}\n")?;
    writeln!(out, "## Project Information\n")?;
    writeln!(out, "- **Primary Language:** {language}")?;
    writeln!(out, "- **Project Type:** {project_type}")?;
    writeln!(out, "- **File Count:** {}", repo.total_files())?;
    writeln!(out, "- **Documentation Maturity:** {}", maturity(review))?;
    if let Some(review) = review {
        writeln!(
            out,
            "- **Quality Score:** {:.1}/100 ({})",
            review.overall_score, review.approval_status
        )?;
    }
    writeln!(out, "- **Reference Documentation:** {document_file}\n")?;
    writeln!(out, "## Documentation Sample\n")?;
    writeln!(out, "```markdown\n{}\n```\n", sample(document))?;
    writeln!(out, "---\n")?;

    writeln!(out, "## Prompt 1: Documentation Rewrite\n")?;
    writeln!(out, "```text")?;
    writeln!(
        out,
        "You are a technical writer. Rewrite the documentation in {document_file} for {name}, {purpose} written in {language}."
    )?;
    writeln!(out, "Keep these sections in order: {sections}.")?;
    if let Some(review) = review {
        let weak: Vec<String> = review
            .recommendations
            .iter()
            .take(5)
            .map(|r| format!("- {}", r.description))
            .collect();
        if !weak.is_empty() {
            writeln!(out, "Address these review findings:\n{}", weak.join("\n"))?;
        }
    }
    writeln!(out, "Replace every placeholder with project-specific content.")?;
    writeln!(out, "```\n")?;

    writeln!(out, "## Prompt 2: Feature Extraction\n")?;
    writeln!(out, "```text")?;
    writeln!(
        out,
        "List the user-facing features of {name}. Start from these candidates: {feature_list}."
    )?;
    writeln!(
        out,
        "For each feature give a one-sentence description, the files that implement it and a usage example in {language}."
    )?;
    writeln!(out, "```\n")?;

    writeln!(out, "## Prompt 3: Onboarding Guide\n")?;
    writeln!(out, "```text")?;
    writeln!(
        out,
        "Write an onboarding guide for a developer joining {name}, a {project_type} project."
    )?;
    let entry = if repo.entry_points.is_empty() {
        "the main entry point".to_string()
    } else {
        repo.entry_points.join(", ")
    };
    writeln!(
        out,
        "Cover environment setup, a walkthrough of {entry}, how to run the tests and a first task touching: {feature_list}."
    )?;
    writeln!(out, "```")?;

    Ok(out)
}
