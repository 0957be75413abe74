//! # review: heuristic quality scoring of an assembled document
//!
//! Four additive scores (completeness, accuracy, clarity, usability) are
//! combined with fixed weights into an overall score and an approval verdict.
//! Gap detection, technical issues and recommendations are derived from the same
//! keyword checks. [`regeneration`] turns a review into a handoff record for the
//! next run.
//!
//! None of these functions fail: a document lacking structure just scores low.

mod gaps;
pub mod regeneration;
pub mod scoring;

pub use gaps::{content_gaps, technical_issues, usability_feedback, ProjectCategory};
pub use regeneration::{RegenerationBlock, RunSummary, TestIntegration};

use crate::contract::Priority;
use crate::model::RepositoryModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

pub const COMPLETENESS_WEIGHT: f64 = 0.30;
pub const ACCURACY_WEIGHT: f64 = 0.25;
pub const CLARITY_WEIGHT: f64 = 0.25;
pub const USABILITY_WEIGHT: f64 = 0.20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScores {
    pub completeness: f64,
    pub accuracy: f64,
    pub clarity: f64,
    pub usability: f64,
}

impl QualityScores {
    pub fn weighted_overall(&self) -> f64 {
        self.completeness * COMPLETENESS_WEIGHT
            + self.accuracy * ACCURACY_WEIGHT
            + self.clarity * CLARITY_WEIGHT
            + self.usability * USABILITY_WEIGHT
    }

    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("completeness", self.completeness),
            ("accuracy", self.accuracy),
            ("clarity", self.clarity),
            ("usability", self.usability),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentGap {
    #[serde(rename = "type")]
    pub kind: String,
    pub section: String,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsabilityFeedback {
    pub navigation: f64,
    pub readability: f64,
    pub actionability: f64,
    pub accessibility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Approved,
    ApprovedWithRecommendations,
    RequiresRevision,
}

impl ApprovalStatus {
    pub fn from_score(overall: f64) -> Self {
        if overall >= 85.0 {
            ApprovalStatus::Approved
        } else if overall >= 70.0 {
            ApprovalStatus::ApprovedWithRecommendations
        } else {
            ApprovalStatus::RequiresRevision
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::ApprovedWithRecommendations => "approved_with_recommendations",
            ApprovalStatus::RequiresRevision => "requires_revision",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub quality_scores: QualityScores,
    pub content_gaps: Vec<ContentGap>,
    pub technical_issues: Vec<TechnicalIssue>,
    pub usability_feedback: UsabilityFeedback,
    pub recommendations: Vec<Recommendation>,
    pub overall_score: f64,
    pub approval_status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_results: Option<TestIntegration>,
}

/// A review together with its regeneration block, as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    #[serde(flatten)]
    pub review: Review,
    pub regeneration_block: RegenerationBlock,
}

/// Scores documents against a repository's facts.
#[derive(Debug, Default, Clone, Copy)]
pub struct QualityScorer;

impl QualityScorer {
    pub fn new() -> Self {
        QualityScorer
    }

    pub fn review(
        &self,
        document: &str,
        repo: &RepositoryModel,
        test_results: Option<&TestIntegration>,
    ) -> Review {
        let primary_language = repo.primary_language();
        let quality_scores = QualityScores {
            completeness: scoring::completeness(document, &primary_language),
            accuracy: scoring::accuracy(document),
            clarity: scoring::clarity(document),
            usability: scoring::usability(document),
        };
        let overall_score = quality_scores.weighted_overall();
        let approval_status = ApprovalStatus::from_score(overall_score);

        let content_gaps = content_gaps(document, &primary_language, ProjectCategory::infer(repo));
        let technical_issues = technical_issues(document);
        let usability_feedback = usability_feedback(document);
        let recommendations = recommendations(
            &quality_scores,
            &content_gaps,
            &technical_issues,
            &usability_feedback,
        );

        info!(
            overall = overall_score,
            status = %approval_status,
            gaps = content_gaps.len(),
            issues = technical_issues.len(),
            "Quality review complete"
        );

        Review {
            quality_scores,
            content_gaps,
            technical_issues,
            usability_feedback,
            recommendations,
            overall_score,
            approval_status,
            test_results: test_results.cloned(),
        }
    }

    /// Reviews the document and attaches a regeneration block for the next pass.
    pub fn report(
        &self,
        document: &str,
        repo: &RepositoryModel,
        run: &RunSummary,
        timestamp: DateTime<Utc>,
    ) -> QualityReport {
        let review = self.review(document, repo, run.test_integration.as_ref());
        let regeneration_block = regeneration::build(Some(&review), repo, run, timestamp);
        QualityReport {
            review,
            regeneration_block,
        }
    }
}

fn severity_priority(severity: Severity) -> Priority {
    match severity {
        Severity::High => Priority::High,
        Severity::Medium => Priority::Medium,
        Severity::Low => Priority::Low,
    }
}

pub fn recommendations(
    scores: &QualityScores,
    gaps: &[ContentGap],
    issues: &[TechnicalIssue],
    feedback: &UsabilityFeedback,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    for (criterion, score) in scores.entries() {
        if score < 70.0 {
            let priority = if score < 50.0 { Priority::High } else { Priority::Medium };
            out.push(Recommendation {
                priority,
                category: "quality".to_string(),
                description: format!("Improve {criterion} (currently {score:.1}/100)"),
            });
        }
    }

    for gap in gaps.iter().filter(|g| g.severity == Severity::High) {
        out.push(Recommendation {
            priority: Priority::High,
            category: "content".to_string(),
            description: format!("Add {} documentation: {}", gap.section.replace('_', " "), gap.description),
        });
    }

    for issue in issues {
        out.push(Recommendation {
            priority: severity_priority(issue.severity),
            category: "technical".to_string(),
            description: issue.recommendation.clone(),
        });
    }

    let aspects = [
        ("navigation", feedback.navigation, "Add table of contents and more section headers"),
        ("readability", feedback.readability, "Break down long sentences for better readability"),
        ("actionability", feedback.actionability, "Add more actionable instructions and commands"),
        ("accessibility", feedback.accessibility, "Consider adding accessibility guidelines"),
    ];
    for (aspect, score, advice) in aspects {
        if score < 70.0 {
            out.push(Recommendation {
                priority: Priority::Medium,
                category: "usability".to_string(),
                description: format!("{advice} ({aspect} {score:.0}/100)"),
            });
        }
    }
    out
}
