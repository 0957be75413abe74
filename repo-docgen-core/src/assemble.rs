//! Assembly of rendered sections into one markdown document.

use crate::contract::{RenderedDocument, RenderedSection};
use crate::outline::SectionKind;
use crate::project_type::title_case;
use chrono::{DateTime, Utc};
use tracing::info;

#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    pub generated_at: DateTime<Utc>,
    pub include_toc: bool,
}

impl AssemblyOptions {
    pub fn at(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            include_toc: true,
        }
    }
}

/// Index in the canonical ordering table; titles outside the catalog sort last.
pub fn canonical_index(title: &str) -> usize {
    SectionKind::from_title(title)
        .map(|k| k.position())
        .unwrap_or(SectionKind::ALL.len())
}

/// Sections sorted by canonical index, then priority. Stable for equal keys.
pub fn ordered_sections(document: &RenderedDocument) -> Vec<&RenderedSection> {
    let mut sections: Vec<&RenderedSection> = document.sections.iter().collect();
    sections.sort_by_key(|s| (canonical_index(&s.title), s.priority.rank()));
    sections
}

/// GitHub-style anchor: lowercase, spaces to hyphens, slashes dropped.
pub fn anchor(title: &str) -> String {
    title.to_lowercase().replace(' ', "-").replace('/', "")
}

pub fn table_of_contents(document: &RenderedDocument) -> Vec<String> {
    ordered_sections(document)
        .into_iter()
        .map(|s| format!("- [{}](#{})", s.title, anchor(&s.title)))
        .collect()
}

/// Removes header lines repeating the title and surrounding blank lines.
pub fn clean_section_content(content: &str, title: &str) -> String {
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !(line.trim_start().starts_with('#') && line.contains(title)))
        .map(str::trim_end)
        .collect();

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => format!("*{title} section is empty.*"),
    }
}

pub fn assemble(document: &RenderedDocument, options: &AssemblyOptions) -> String {
    let mut out: Vec<String> = Vec::new();
    let metadata = &document.metadata;
    let timestamp = options.generated_at.to_rfc3339();

    out.push(format!("# {}", document.project_name));
    out.push(String::new());

    out.push("---".into());
    out.push(String::new());
    out.push(format!("**Primary Language:** {}", metadata.primary_language));
    out.push(format!("**Project Type:** {}", metadata.project_type.title()));
    out.push(format!("**Complexity:** {}", title_case(metadata.complexity.as_str())));
    out.push(format!("**Generated:** {timestamp}"));
    out.push(String::new());
    out.push("---".into());
    out.push(String::new());

    if options.include_toc && !document.sections.is_empty() {
        out.push("## Table of Contents".into());
        out.push(String::new());
        out.extend(table_of_contents(document));
        out.push(String::new());
        out.push("---".into());
        out.push(String::new());
    }

    for section in ordered_sections(document) {
        out.push(format!("## {}", section.title));
        out.push(String::new());
        out.push(clean_section_content(&section.content, &section.title));
        out.push(String::new());
        if section.fallback_used {
            out.push("<!-- Generated using fallback template -->".into());
            out.push(String::new());
        }
    }

    out.push("---".into());
    out.push(String::new());
    out.push("## Documentation Info".into());
    out.push(String::new());
    out.push(format!(
        "*This documentation was generated automatically by repo-docgen {}.*",
        env!("CARGO_PKG_VERSION")
    ));
    out.push(String::new());
    out.push(format!("*Generated on: {timestamp}*"));

    let markdown = out.join("\n");
    info!(
        project = %document.project_name,
        sections = document.sections.len(),
        bytes = markdown.len(),
        "Document assembled"
    );
    markdown
}

/// Per-run overview of how each section was produced.
pub fn summary_report(document: &RenderedDocument) -> String {
    let total = document.sections.len();
    let fallbacks = document.fallback_count();
    let success_rate = if total == 0 {
        0.0
    } else {
        (total - fallbacks) as f64 / total as f64 * 100.0
    };

    let mut out = String::new();
    out.push_str(&format!("# Documentation Summary: {}\n\n", document.project_name));
    out.push_str(&format!("- **Total Sections:** {total}\n"));
    out.push_str(&format!("- **Total Words:** {}\n", document.total_words()));
    out.push_str(&format!("- **Fallback Sections:** {fallbacks}\n"));
    out.push_str(&format!("- **Success Rate:** {success_rate:.1}%\n\n"));
    out.push_str("| Section | Priority | Words | Status |\n");
    out.push_str("|---------|----------|-------|--------|\n");
    for section in ordered_sections(document) {
        let status = if section.fallback_used { "Fallback" } else { "OK" };
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            section.title, section.priority, section.word_count, status
        ));
    }
    out
}
