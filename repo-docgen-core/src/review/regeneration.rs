//! Handoff record for the next documentation pass.

use super::{ApprovalStatus, QualityScores, Review, Severity};
use crate::model::RepositoryModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Results of generated tests, when the driver ran any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestIntegration {
    pub files_generated: usize,
    pub strategy: String,
    pub coverage_target: u8,
}

/// Everything a human or an LLM needs to start the next pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegenerationBlock {
    pub phase: String,
    pub timestamp: DateTime<Utc>,
    /// `None` when the quality review was skipped.
    pub overall_score: Option<f64>,
    pub approval_status: Option<ApprovalStatus>,
    pub changes_this_pass: Vec<String>,
    pub quality_breakdown: Option<QualityScores>,
    pub critical_issues: Vec<String>,
    pub errors_or_todos: Vec<String>,
    pub recommended_next_steps: Vec<String>,
    pub inputs_used: Vec<String>,
    pub outputs_generated: Vec<String>,
    pub metrics: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_integration: Option<TestIntegration>,
}

/// Run facts the scorer cannot see on its own.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub phase: String,
    pub changes: Vec<String>,
    pub errors: Vec<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub sections: usize,
    pub fallback_sections: usize,
    pub total_words: usize,
    pub test_integration: Option<TestIntegration>,
}

/// Builds the block for a run. `review` is `None` when scoring was skipped; the
/// block is still produced, with its quality fields empty.
pub fn build(
    review: Option<&Review>,
    repo: &RepositoryModel,
    run: &RunSummary,
    timestamp: DateTime<Utc>,
) -> RegenerationBlock {
    let critical_issues: Vec<String> = review
        .map(|review| {
            review
                .content_gaps
                .iter()
                .filter(|g| g.severity == Severity::High)
                .map(|g| g.description.clone())
                .chain(
                    review
                        .technical_issues
                        .iter()
                        .filter(|i| i.severity == Severity::High)
                        .map(|i| i.description.clone()),
                )
                .collect()
        })
        .unwrap_or_default();

    let mut metrics = BTreeMap::new();
    metrics.insert("sections".to_string(), run.sections as f64);
    metrics.insert("fallback_sections".to_string(), run.fallback_sections as f64);
    metrics.insert("total_words".to_string(), run.total_words as f64);
    metrics.insert("repository_files".to_string(), repo.total_files() as f64);
    metrics.insert("errors".to_string(), run.errors.len() as f64);
    if let Some(review) = review {
        metrics.insert("content_gaps".to_string(), review.content_gaps.len() as f64);
        metrics.insert(
            "technical_issues".to_string(),
            review.technical_issues.len() as f64,
        );
    }

    RegenerationBlock {
        phase: if run.phase.is_empty() {
            "v2".to_string()
        } else {
            run.phase.clone()
        },
        timestamp,
        overall_score: review.map(|r| r.overall_score),
        approval_status: review.map(|r| r.approval_status),
        changes_this_pass: run.changes.clone(),
        quality_breakdown: review.map(|r| r.quality_scores.clone()),
        critical_issues,
        errors_or_todos: run.errors.clone(),
        recommended_next_steps: review.map(next_steps).unwrap_or_else(unreviewed_next_steps),
        inputs_used: run.inputs.clone(),
        outputs_generated: run.outputs.clone(),
        metrics,
        test_integration: run.test_integration.clone(),
    }
}

fn unreviewed_next_steps() -> Vec<String> {
    vec![
        "Run the quality review to score this document".to_string(),
        "Check the generated sections for placeholder text".to_string(),
    ]
}

/// Threshold-driven suggestions for the following pass.
pub fn next_steps(review: &Review) -> Vec<String> {
    let mut steps = Vec::new();
    if review.overall_score < 70.0 {
        steps.push("Revise the document: fill missing sections and replace placeholder text".to_string());
        steps.push("Add concrete installation and usage examples with code blocks".to_string());
    } else if review.overall_score < 85.0 {
        steps.push("Polish the weakest criterion before publishing".to_string());
        steps.push("Resolve the listed technical issues".to_string());
    } else {
        steps.push("Publish the document and keep it in sync with releases".to_string());
    }
    for gap in review
        .content_gaps
        .iter()
        .filter(|g| g.severity == Severity::High)
    {
        steps.push(format!("Add a {} section", gap.section.replace('_', " ")));
    }
    steps
}

impl RegenerationBlock {
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Regeneration Block ({})\n\n", self.phase));
        out.push_str(&format!("**Timestamp:** {}\n", self.timestamp.to_rfc3339()));
        match self.overall_score {
            Some(score) => out.push_str(&format!("**Overall Score:** {score:.1}/100\n")),
            None => out.push_str("**Overall Score:** N/A\n"),
        }
        out.push_str(&format!(
            "**Status:** {}\n\n",
            self.approval_status.map_or("N/A", |s| s.as_str())
        ));

        out.push_str("## Quality Breakdown\n\n");
        match &self.quality_breakdown {
            Some(scores) => {
                out.push_str("| Criterion | Score |\n|-----------|-------|\n");
                for (name, score) in scores.entries() {
                    out.push_str(&format!("| {name} | {score:.1} |\n"));
                }
            }
            None => out.push_str("- Quality review not available\n"),
        }
        out.push('\n');

        push_list(&mut out, "Changes This Pass", &self.changes_this_pass);
        push_list(&mut out, "Critical Issues", &self.critical_issues);
        push_list(&mut out, "Errors or TODOs", &self.errors_or_todos);
        push_list(&mut out, "Recommended Next Steps", &self.recommended_next_steps);
        push_list(&mut out, "Inputs Used", &self.inputs_used);
        push_list(&mut out, "Outputs Generated", &self.outputs_generated);

        out.push_str("## Metrics\n\n");
        for (name, value) in &self.metrics {
            out.push_str(&format!("- {name}: {value}\n"));
        }
        out.push('\n');

        if let Some(tests) = &self.test_integration {
            out.push_str("## Test Integration\n\n");
            out.push_str(&format!("- Strategy: {}\n", tests.strategy));
            out.push_str(&format!("- Files generated: {}\n", tests.files_generated));
            out.push_str(&format!("- Coverage target: {}%\n\n", tests.coverage_target));
        }
        out
    }
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    out.push_str(&format!("## {heading}\n\n"));
    if items.is_empty() {
        out.push_str("- None\n");
    }
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
    out.push('\n');
}
