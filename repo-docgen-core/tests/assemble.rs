use chrono::{TimeZone, Utc};
use repo_docgen_core::assemble::{
    anchor, assemble, canonical_index, clean_section_content, summary_report, table_of_contents,
    AssemblyOptions,
};
use repo_docgen_core::contract::{Priority, RenderedDocument, RenderedSection};
use repo_docgen_core::model::RepositoryModel;
use repo_docgen_core::outline::{build_outline, SectionKind};

fn section(title: &str, content: &str, priority: Priority, fallback: bool) -> RenderedSection {
    RenderedSection {
        title: title.to_string(),
        content: content.to_string(),
        priority,
        required: true,
        description: String::new(),
        word_count: content.split_whitespace().count(),
        fallback_used: fallback,
        strategy: if fallback { "fallback" } else { "template" }.to_string(),
        error: None,
    }
}

fn document(sections: Vec<RenderedSection>) -> RenderedDocument {
    let outline = build_outline(&RepositoryModel {
        name: "demo".to_string(),
        ..RepositoryModel::default()
    });
    RenderedDocument {
        project_name: "demo".to_string(),
        metadata: outline.metadata,
        sections,
    }
}

fn options() -> AssemblyOptions {
    AssemblyOptions::at(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
}

#[test]
fn toc_follows_canonical_order_with_unknown_last() {
    let doc = document(vec![
        section("Zebra Notes", "custom", Priority::High, false),
        section("Usage", "run it", Priority::High, false),
        section("Project Summary & Goals", "what it is", Priority::High, false),
        section("Setup Instructions", "install it", Priority::High, false),
    ]);
    assert_eq!(
        table_of_contents(&doc),
        vec![
            "- [Project Summary & Goals](#project-summary-&-goals)",
            "- [Setup Instructions](#setup-instructions)",
            "- [Usage](#usage)",
            "- [Zebra Notes](#zebra-notes)",
        ]
    );
}

#[test]
fn unknown_titles_sort_after_every_catalog_entry() {
    assert_eq!(canonical_index("Not In Catalog"), SectionKind::ALL.len());
    for kind in SectionKind::ALL {
        assert!(canonical_index(kind.title()) < canonical_index("Not In Catalog"));
    }
}

#[test]
fn unknown_titles_order_by_priority() {
    let doc = document(vec![
        section("Later", "b", Priority::Low, false),
        section("Sooner", "a", Priority::High, false),
    ]);
    let toc = table_of_contents(&doc);
    assert_eq!(toc[0], "- [Sooner](#sooner)");
    assert_eq!(toc[1], "- [Later](#later)");
}

#[test]
fn anchors_drop_slashes() {
    assert_eq!(anchor("CI/CD Pipeline"), "cicd-pipeline");
    assert_eq!(anchor("Usage"), "usage");
}

#[test]
fn cleaning_strips_repeated_title_and_blank_edges() {
    let cleaned = clean_section_content("## Usage\n\n\nRun the tool.   \n\n", "Usage");
    assert_eq!(cleaned, "Run the tool.");
    assert_eq!(clean_section_content("## Usage\n\n", "Usage"), "*Usage section is empty.*");
}

#[test]
fn assembled_document_has_header_toc_sections_and_footer() {
    let doc = document(vec![
        section("Usage", "## Usage\n\nRun `demo`.", Priority::High, false),
        section("Project Summary & Goals", "## Project Summary & Goals\n\nIt documents.", Priority::High, true),
    ]);
    let markdown = assemble(&doc, &options());

    assert!(markdown.starts_with("# demo\n"));
    assert!(markdown.contains("**Primary Language:** unknown"));
    assert!(markdown.contains("**Generated:** 2024-05-01T12:00:00+00:00"));
    assert!(markdown.contains("## Table of Contents"));
    let summary = markdown.find("## Project Summary & Goals").expect("summary heading");
    let usage = markdown.find("## Usage").expect("usage heading");
    assert!(summary < usage);
    assert_eq!(markdown.matches("## Usage").count(), 1);
    assert!(markdown.contains("It documents.\n\n<!-- Generated using fallback template -->"));
    assert!(markdown.contains("## Documentation Info"));
    assert!(markdown.trim_end().ends_with("*Generated on: 2024-05-01T12:00:00+00:00*"));
}

#[test]
fn toc_can_be_disabled() {
    let doc = document(vec![section("Usage", "Run it.", Priority::High, false)]);
    let mut opts = options();
    opts.include_toc = false;
    assert!(!assemble(&doc, &opts).contains("## Table of Contents"));
}

#[test]
fn summary_reports_fallbacks_and_success_rate() {
    let doc = document(vec![
        section("Usage", "one two three", Priority::High, false),
        section("License", "four", Priority::Low, true),
    ]);
    let report = summary_report(&doc);
    assert!(report.contains("- **Total Sections:** 2"));
    assert!(report.contains("- **Total Words:** 4"));
    assert!(report.contains("- **Fallback Sections:** 1"));
    assert!(report.contains("- **Success Rate:** 50.0%"));
    assert!(report.contains("| Usage | high | 3 | OK |"));
    assert!(report.contains("| License | low | 1 | Fallback |"));
}
