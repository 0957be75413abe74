use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use repo_docgen_core::model::RepositoryModel;
use repo_docgen_core::review::regeneration;
use repo_docgen_core::review::scoring::{accuracy, clarity, completeness, usability};
use repo_docgen_core::review::{
    content_gaps, technical_issues, usability_feedback, ApprovalStatus, ProjectCategory,
    QualityScorer, RunSummary, Severity, TestIntegration,
};

fn python_repo() -> RepositoryModel {
    let mut repo = RepositoryModel {
        name: "demo".to_string(),
        ..RepositoryModel::default()
    };
    repo.languages.insert("python".to_string(), 5);
    repo
}

fn complete_document() -> String {
    let mut doc = String::from(
        "# Demo\n\n## Overview\nA python tool.\n\n## Installation\nRun the install step first.\n\n\
         ```bash\npip install demo\n```\n\n## Usage\n- run `demo`\n\n## API\nSee [docs](https://docs.rs).\n\n\
         ## Examples\nThen configure it.\n\n## Contributing\nOpen an issue for help.\n\n\
         ## License\nMIT.\n\n## Changelog\nFirst release.\n\n## Troubleshooting\nCommon issues are listed here.\n",
    );
    while doc.chars().count() <= 1000 {
        doc.push_str("Short sentences keep the text readable.\n");
    }
    doc
}

#[test]
fn placeholders_cost_accuracy() {
    let score = accuracy("TODO: link to https://example.com once it exists");
    assert!(score <= 60.0, "accuracy was {score}");
    assert_eq!(accuracy("Clean text."), 80.0);
}

#[test]
fn repeated_placeholder_counts_once() {
    assert_eq!(accuracy("todo todo TODO"), 70.0);
}

#[test]
fn unbalanced_fence_and_malformed_link_cost_five_each() {
    assert_eq!(accuracy("```rust\nfn main() {}\n"), 75.0);
    assert_eq!(accuracy("See [a](my file.md) and [b](other file.md)."), 75.0);
    assert_eq!(accuracy("```\nSee [a](my file.md) and [b](other file.md)."), 70.0);
}

#[test]
fn plain_prose_scores_low_clarity() {
    let doc = "This paragraph has no headings no code and no lists at all. It is only prose.";
    assert!(clarity(doc) <= 20.0);
}

#[test]
fn every_hash_counts_toward_headers() {
    // One heading line with three hashes reaches the top header tier.
    assert_eq!(clarity("### Setup\nplain"), 45.0);
    assert_eq!(clarity("# Setup\nplain"), 35.0);
}

#[test]
fn empty_fragments_shorten_average_sentence_length() {
    // 36 words over two fragments averages 18, under the 20-word tier.
    let sentence = "word ".repeat(36);
    assert_eq!(clarity(&format!("{sentence}.")), 20.0);
    assert_eq!(clarity(&sentence), 0.0);
}

#[test]
fn structured_document_scores_full_clarity_components() {
    let doc = "# A\n## B\n### C\n```sh\nls\n```\n- item\n[x](y)\nShort sentence.";
    assert_eq!(clarity(doc), 90.0);
}

#[test]
fn complete_document_scores_full_completeness() {
    assert_eq!(completeness(&complete_document(), "python"), 100.0);
}

#[test]
fn unknown_language_earns_no_language_points() {
    let doc = complete_document().replace("python", "snake");
    assert_eq!(completeness(&doc, "unknown"), 80.0);
}

#[test]
fn usability_rewards_actionable_text() {
    assert_eq!(usability(""), 0.0);
    let doc = "Install it, run it, configure it. First step. Troubleshooting FAQ. Contact support. Screen reader notes.";
    assert_eq!(usability(doc), 100.0);
}

#[test]
fn review_of_strong_document_is_approved_or_close() {
    let review = QualityScorer::new().review(&complete_document(), &python_repo(), None);
    assert!(review.overall_score >= 70.0, "score {}", review.overall_score);
    assert_ne!(review.approval_status, ApprovalStatus::RequiresRevision);
    assert!(review
        .content_gaps
        .iter()
        .all(|g| g.severity != Severity::High));
}

#[test]
fn empty_document_requires_revision() {
    let review = QualityScorer::new().review("", &python_repo(), None);
    assert_eq!(review.approval_status, ApprovalStatus::RequiresRevision);
    let sections: Vec<&str> = review.content_gaps.iter().map(|g| g.section.as_str()).collect();
    assert!(sections.contains(&"installation"));
    assert!(sections.contains(&"usage"));
    assert!(sections.contains(&"python_requirements"));
    assert!(!review.recommendations.is_empty());
}

#[test]
fn approval_thresholds() {
    assert_eq!(ApprovalStatus::from_score(85.0), ApprovalStatus::Approved);
    assert_eq!(ApprovalStatus::from_score(84.9), ApprovalStatus::ApprovedWithRecommendations);
    assert_eq!(ApprovalStatus::from_score(70.0), ApprovalStatus::ApprovedWithRecommendations);
    assert_eq!(ApprovalStatus::from_score(69.9), ApprovalStatus::RequiresRevision);
}

#[test]
fn each_missing_language_requirement_is_a_gap() {
    let gaps = content_gaps("Run pip install foo to get the api", "python", ProjectCategory::General);
    let language: Vec<&str> = gaps
        .iter()
        .filter(|g| g.kind == "language_specific")
        .map(|g| g.description.as_str())
        .collect();
    assert_eq!(
        language,
        vec![
            "Missing python-specific information about requirements.txt",
            "Missing python-specific information about virtual environment",
        ]
    );
    assert!(gaps
        .iter()
        .filter(|g| g.kind == "language_specific")
        .all(|g| g.section == "python_requirements" && g.severity == Severity::Medium));
}

#[test]
fn project_category_requirements_are_gaps() {
    let gaps = content_gaps("install usage deployment", "unknown", ProjectCategory::WebApplication);
    let sections: Vec<&str> = gaps
        .iter()
        .filter(|g| g.kind == "project_type_specific")
        .map(|g| g.section.as_str())
        .collect();
    assert_eq!(
        sections,
        vec![
            "web_application_environment variables",
            "web_application_browser support",
        ]
    );
    assert!(content_gaps("install", "unknown", ProjectCategory::General)
        .iter()
        .all(|g| g.kind != "project_type_specific"));
}

#[test]
fn project_category_is_inferred_from_file_names() {
    let with_files = |files: &[&str]| RepositoryModel {
        files: files.iter().map(|f| f.to_string()).collect(),
        ..RepositoryModel::default()
    };
    assert_eq!(ProjectCategory::infer(&with_files(&["web/index.html"])), ProjectCategory::WebApplication);
    assert_eq!(ProjectCategory::infer(&with_files(&["pkg/__init__.py"])), ProjectCategory::PythonLibrary);
    assert_eq!(ProjectCategory::infer(&with_files(&["pom.xml"])), ProjectCategory::JavaApplication);
    assert_eq!(ProjectCategory::infer(&with_files(&["Cargo.toml"])), ProjectCategory::RustProject);
    assert_eq!(ProjectCategory::infer(&with_files(&["notes.txt"])), ProjectCategory::General);
}

#[test]
fn usability_feedback_sub_scores() {
    let feedback = usability_feedback(
        "# A\n## Table of Contents\n- [Install](#install)\nInstall, run and build it. Configure it.",
    );
    assert_eq!(feedback.navigation, 100.0);
    assert_eq!(feedback.readability, 100.0);
    assert_eq!(feedback.actionability, 60.0);
    assert_eq!(feedback.accessibility, 60.0);

    let long = format!("{}.", "word ".repeat(60));
    let feedback = usability_feedback(&long);
    assert_eq!(feedback.navigation, 0.0);
    assert_eq!(feedback.readability, 70.0);
    assert_eq!(feedback.actionability, 0.0);

    assert_eq!(usability_feedback("Screen reader friendly").accessibility, 80.0);
}

#[test]
fn weak_usability_aspects_become_recommendations() {
    let review = QualityScorer::new().review("plain words", &python_repo(), None);
    let advice: Vec<&str> = review
        .recommendations
        .iter()
        .filter(|r| r.category == "usability")
        .map(|r| r.description.as_str())
        .collect();
    assert!(advice.iter().any(|d| d.starts_with("Add table of contents")));
    assert!(advice.iter().any(|d| d.starts_with("Consider adding accessibility guidelines")));
    assert!(!advice.iter().any(|d| d.starts_with("Break down long sentences")));
}

#[test]
fn untagged_code_block_is_flagged() {
    let issues = technical_issues("```\nls\n```\n");
    assert!(!issues.is_empty());
}

#[test]
fn report_carries_regeneration_block() {
    let run = RunSummary {
        phase: "v2".to_string(),
        changes: vec!["Generated 12 sections".to_string()],
        errors: vec!["convert: pandoc missing".to_string()],
        inputs: vec!["https://github.com/acme/demo".to_string()],
        outputs: vec!["output/demo_documentation.md".to_string()],
        sections: 12,
        fallback_sections: 1,
        total_words: 900,
        test_integration: Some(TestIntegration {
            files_generated: 3,
            strategy: "lightweight".to_string(),
            coverage_target: 70,
        }),
    };
    let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
    let report = QualityScorer::new().report(&complete_document(), &python_repo(), &run, timestamp);

    let block = &report.regeneration_block;
    assert_eq!(block.overall_score, Some(report.review.overall_score));
    assert_eq!(block.approval_status, Some(report.review.approval_status));
    assert_eq!(block.quality_breakdown.as_ref(), Some(&report.review.quality_scores));
    assert_eq!(block.errors_or_todos, run.errors);
    assert_eq!(block.metrics["sections"], 12.0);
    assert!(!block.recommended_next_steps.is_empty());
    assert!(report.review.test_results.is_some());

    let markdown = block.to_markdown();
    assert!(markdown.starts_with("# Regeneration Block (v2)"));
    assert!(markdown.contains("**Timestamp:** 2024-05-01T08:30:00+00:00"));
    assert!(markdown.contains("- Coverage target: 70%"));

    let json = serde_json::to_value(&report).expect("report serializes");
    assert!(json.get("overall_score").is_some());
    assert!(json.get("regeneration_block").is_some());
}

#[test]
fn unreviewed_run_still_gets_a_regeneration_block() {
    let run = RunSummary {
        errors: vec!["convert: pandoc missing".to_string()],
        sections: 4,
        ..RunSummary::default()
    };
    let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
    let block = regeneration::build(None, &python_repo(), &run, timestamp);

    assert_eq!(block.phase, "v2");
    assert!(block.overall_score.is_none());
    assert!(block.approval_status.is_none());
    assert!(block.quality_breakdown.is_none());
    assert!(block.critical_issues.is_empty());
    assert_eq!(block.metrics["errors"], 1.0);
    assert!(!block.metrics.contains_key("content_gaps"));

    let markdown = block.to_markdown();
    assert!(markdown.contains("**Overall Score:** N/A"));
    assert!(markdown.contains("**Status:** N/A"));
    assert!(markdown.contains("- Quality review not available"));
    assert!(markdown.contains("- convert: pandoc missing"));
}

proptest! {
    #[test]
    fn overall_is_bounded_weighted_mean(doc in "(# [a-z ]{0,20}\n|- [a-z]{0,10}\n|```\n|todo |install |[a-z .]{0,40}\n){0,30}") {
        let review = QualityScorer::new().review(&doc, &python_repo(), None);
        let s = &review.quality_scores;
        for (_, score) in s.entries() {
            prop_assert!((0.0..=100.0).contains(&score));
        }
        let expected = s.completeness * 0.30 + s.accuracy * 0.25 + s.clarity * 0.25 + s.usability * 0.20;
        prop_assert!((review.overall_score - expected).abs() < 1e-9);
        prop_assert!((0.0..=100.0).contains(&review.overall_score));
    }
}
