//! Outline planning: a filtered static catalog of sections plus one prompt per section.
//!
//! [`SectionKind`] is the registry of known sections. Its declaration order is the
//! order sections appear in an outline and the canonical order used when the
//! document is assembled.

use crate::contract::{Outline, OutlineMetadata, Priority, SectionDescriptor};
use crate::model::RepositoryModel;
use crate::project_type::{is_api_project, OutlineComplexity, ProjectType};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    ProjectSummary,
    KeyFeatures,
    TechnologyStack,
    SetupInstructions,
    Configuration,
    Usage,
    ApiDocumentation,
    ProjectStructure,
    Components,
    ExecutionPlan,
    DevelopmentWorkflow,
    TestingStrategy,
    DeploymentChecklist,
    Troubleshooting,
    PerformanceOptimization,
    Contributing,
    License,
}

impl SectionKind {
    pub const ALL: [SectionKind; 17] = [
        SectionKind::ProjectSummary,
        SectionKind::KeyFeatures,
        SectionKind::TechnologyStack,
        SectionKind::SetupInstructions,
        SectionKind::Configuration,
        SectionKind::Usage,
        SectionKind::ApiDocumentation,
        SectionKind::ProjectStructure,
        SectionKind::Components,
        SectionKind::ExecutionPlan,
        SectionKind::DevelopmentWorkflow,
        SectionKind::TestingStrategy,
        SectionKind::DeploymentChecklist,
        SectionKind::Troubleshooting,
        SectionKind::PerformanceOptimization,
        SectionKind::Contributing,
        SectionKind::License,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::ProjectSummary => "Project Summary & Goals",
            SectionKind::KeyFeatures => "Key Features & Use Cases",
            SectionKind::TechnologyStack => "Technology Stack",
            SectionKind::SetupInstructions => "Setup Instructions",
            SectionKind::Configuration => "Configuration Required",
            SectionKind::Usage => "Usage",
            SectionKind::ApiDocumentation => "API Documentation",
            SectionKind::ProjectStructure => "Project Structure",
            SectionKind::Components => "Major Components & Modules",
            SectionKind::ExecutionPlan => "Execution Plan",
            SectionKind::DevelopmentWorkflow => "Development Workflow",
            SectionKind::TestingStrategy => "Testing Strategy",
            SectionKind::DeploymentChecklist => "Deployment Checklist",
            SectionKind::Troubleshooting => "Troubleshooting & Tips",
            SectionKind::PerformanceOptimization => "Performance Optimization",
            SectionKind::Contributing => "Contributing Guidelines",
            SectionKind::License => "License",
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.title() == title)
    }

    /// Position in the canonical ordering table.
    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or(Self::ALL.len())
    }

    pub fn priority(&self) -> Priority {
        match self {
            SectionKind::ProjectSummary
            | SectionKind::KeyFeatures
            | SectionKind::TechnologyStack
            | SectionKind::SetupInstructions
            | SectionKind::Configuration
            | SectionKind::Usage
            | SectionKind::ApiDocumentation
            | SectionKind::ProjectStructure
            | SectionKind::Components => Priority::High,
            SectionKind::ExecutionPlan
            | SectionKind::DevelopmentWorkflow
            | SectionKind::TestingStrategy
            | SectionKind::DeploymentChecklist
            | SectionKind::Troubleshooting
            | SectionKind::PerformanceOptimization => Priority::Medium,
            SectionKind::Contributing | SectionKind::License => Priority::Low,
        }
    }

    pub fn required(&self) -> bool {
        !matches!(self, SectionKind::License)
    }

    pub fn description(&self) -> &'static str {
        match self {
            SectionKind::ProjectSummary => "Comprehensive project overview including goals, target audience, and primary objectives",
            SectionKind::KeyFeatures => "Detailed feature breakdown with use cases and examples",
            SectionKind::TechnologyStack => "Comprehensive breakdown of technologies, frameworks, libraries, and tools",
            SectionKind::SetupInstructions => "Comprehensive installation and setup guide with prerequisites and troubleshooting",
            SectionKind::Configuration => "Detailed configuration setup including environment variables and framework configurations",
            SectionKind::Usage => "How to use the project with examples",
            SectionKind::ApiDocumentation => "API endpoints, request/response formats",
            SectionKind::ProjectStructure => "Detailed directory structure with descriptions and file organization",
            SectionKind::Components => "Detailed breakdown of core application components and their responsibilities",
            SectionKind::ExecutionPlan => "Step-by-step execution workflow and operational procedures",
            SectionKind::DevelopmentWorkflow => "Comprehensive development guidelines and best practices",
            SectionKind::TestingStrategy => "Comprehensive testing approach including unit, integration, and end-to-end testing",
            SectionKind::DeploymentChecklist => "Complete deployment guide with pre-deployment checks and post-deployment verification",
            SectionKind::Troubleshooting => "Common issues, solutions, and best practices for development and deployment",
            SectionKind::PerformanceOptimization => "Performance optimization strategies and monitoring techniques",
            SectionKind::Contributing => "Guidelines for contributing to the project including code standards and review process",
            SectionKind::License => "License information and terms",
        }
    }

    pub fn subsections(&self) -> &'static [&'static str] {
        match self {
            SectionKind::ProjectSummary => &["Overview", "Primary Goals", "Target Audience", "Success Metrics"],
            SectionKind::KeyFeatures => &["Core Features", "Use Cases", "Feature Highlights", "Capabilities Matrix"],
            SectionKind::TechnologyStack => &["Programming Languages", "Frameworks & Libraries", "Development Tools", "File Breakdown", "Architecture Overview"],
            SectionKind::SetupInstructions => &["Prerequisites", "System Requirements", "Step-by-Step Installation", "Verification", "Troubleshooting Installation"],
            SectionKind::Configuration => &["Environment Variables", "Language Configuration", "Build Configuration", "Development Settings"],
            SectionKind::Usage => &[],
            SectionKind::ApiDocumentation => &[],
            SectionKind::ProjectStructure => &["Directory Tree", "Directory Descriptions", "Key Files", "Asset Organization"],
            SectionKind::Components => &["Core Application Components", "Data Management", "Architecture Patterns", "Module Dependencies"],
            SectionKind::ExecutionPlan => &["Development Workflow", "Build Process", "Testing Strategy", "Deployment Pipeline"],
            SectionKind::DevelopmentWorkflow => &["Development Environment", "Code Standards", "Git Workflow", "Review Process"],
            SectionKind::TestingStrategy => &["Testing Framework", "Test Types", "Running Tests", "Coverage Reports", "CI/CD Integration"],
            SectionKind::DeploymentChecklist => &["Pre-deployment Checks", "Deployment Steps", "Environment Configuration", "Monitoring Setup", "Rollback Procedures"],
            SectionKind::Troubleshooting => &["Common Issues", "Development Tips", "Performance Tips", "Debugging Guide", "FAQ"],
            SectionKind::PerformanceOptimization => &["Optimization Strategies", "Monitoring Tools", "Benchmarking", "Caching Strategies", "Resource Management"],
            SectionKind::Contributing => &["Getting Started", "Code Standards", "Pull Request Process", "Issue Reporting", "Community Guidelines"],
            SectionKind::License => &[],
        }
    }

    /// Whether the section belongs in the outline for this repository.
    pub fn applies_to(&self, repo: &RepositoryModel) -> bool {
        match self {
            SectionKind::TechnologyStack => {
                !repo.languages.is_empty() || !repo.dependencies.is_empty()
            }
            SectionKind::ApiDocumentation => is_api_project(repo),
            SectionKind::License => repo.license.is_some(),
            _ => true,
        }
    }

    pub fn descriptor(&self) -> SectionDescriptor {
        SectionDescriptor {
            title: self.title().to_string(),
            priority: self.priority(),
            required: self.required(),
            description: self.description().to_string(),
            subsections: self.subsections().iter().map(|s| s.to_string()).collect(),
        }
    }

    fn instructions(&self) -> &'static [&'static str] {
        match self {
            SectionKind::ProjectSummary => &[
                "Provide a clear, concise description of what the project does",
                "Explain the problem it solves or need it addresses",
                "Mention target audience or use cases",
                "Keep it under 3 paragraphs",
            ],
            SectionKind::KeyFeatures => &[
                "List key features and capabilities",
                "Use bullet points for clarity",
                "Focus on user-facing functionality",
                "Highlight unique or standout features",
            ],
            SectionKind::TechnologyStack => &[
                "List programming languages, frameworks, and major dependencies",
                "Organize by category (backend, frontend, database, etc.)",
                "Include version information where relevant",
                "Explain why key technologies were chosen",
            ],
            SectionKind::SetupInstructions => &[
                "Provide step-by-step installation instructions",
                "Include prerequisites and system requirements",
                "Cover different installation methods if applicable",
                "Include verification steps",
            ],
            SectionKind::Configuration => &[
                "Document environment variables and configuration options",
                "Provide example configuration files",
                "Explain required vs optional settings",
                "Include security considerations",
            ],
            SectionKind::Usage => &[
                "Provide basic usage examples",
                "Include code snippets and command-line examples",
                "Cover common use cases",
                "Show expected output where helpful",
            ],
            SectionKind::ApiDocumentation => &[
                "Document all endpoints with HTTP methods",
                "Include request/response examples",
                "Document authentication requirements",
                "Provide error codes and handling",
            ],
            SectionKind::ProjectStructure => &[
                "Explain directory organization",
                "Describe purpose of key files and folders",
                "Use tree structure visualization",
                "Highlight important entry points",
            ],
            SectionKind::Components | SectionKind::ExecutionPlan => &[
                "Describe each major component and its responsibility",
                "Explain how components interact",
                "Reference the directories that contain them",
            ],
            SectionKind::DevelopmentWorkflow | SectionKind::Contributing => &[
                "Explain development setup process",
                "Document build and run procedures",
                "Include debugging and testing workflows",
                "Provide contribution guidelines",
            ],
            SectionKind::TestingStrategy => &[
                "Explain how to run tests",
                "Document test structure and organization",
                "Include coverage information if available",
                "Provide guidelines for writing new tests",
            ],
            SectionKind::DeploymentChecklist => &[
                "Provide deployment instructions for different environments",
                "Include Docker/containerization if applicable",
                "Document environment-specific configurations",
                "Include monitoring and maintenance notes",
            ],
            SectionKind::Troubleshooting | SectionKind::PerformanceOptimization => &[
                "List common problems with their fixes",
                "Keep each tip short and actionable",
            ],
            SectionKind::License => &[
                "State the license type clearly",
                "Include any usage restrictions or requirements",
                "Provide link to full license text",
            ],
        }
    }

    /// The slice of repository facts relevant to this section's prompt.
    fn prompt_data(&self, repo: &RepositoryModel) -> Value {
        match self {
            SectionKind::ProjectSummary | SectionKind::KeyFeatures => json!({
                "name": repo.name,
                "readme_sections": repo.readme.sections,
                "languages": repo.languages,
            }),
            SectionKind::TechnologyStack => json!({
                "languages": repo.languages,
                "dependencies": repo.dependencies,
            }),
            SectionKind::SetupInstructions | SectionKind::Configuration => json!({
                "dependencies": repo.dependencies,
                "config_files": repo.config_files,
            }),
            SectionKind::Usage | SectionKind::ApiDocumentation => json!({
                "entry_points": repo.entry_points,
                "readme_sections": repo.readme.sections,
            }),
            SectionKind::ProjectStructure | SectionKind::Components => json!({
                "structure": {
                    "root_files": repo.structure.root_files,
                    "directories": repo.structure.directories,
                    "total_files": repo.structure.total_files,
                    "max_depth": repo.structure.max_depth,
                },
            }),
            SectionKind::TestingStrategy => json!({ "tests": repo.tests }),
            SectionKind::DeploymentChecklist | SectionKind::ExecutionPlan => json!({
                "ci_cd": repo.ci_cd,
                "config_files": repo.config_files,
            }),
            SectionKind::License => json!({ "license": repo.license }),
            SectionKind::DevelopmentWorkflow
            | SectionKind::Troubleshooting
            | SectionKind::PerformanceOptimization
            | SectionKind::Contributing => json!({
                "statistics": repo.statistics,
                "ci_cd": repo.ci_cd,
            }),
        }
    }
}

const DEFAULT_META_PROMPT: &str = "# Documentation Generation\n\nYou are a senior technical writer. Produce accurate, well-structured project documentation from the repository facts below. Prefer concrete commands and file names over generic advice.";

/// Builds the outline with the built-in meta-prompt.
pub fn build_outline(repo: &RepositoryModel) -> Outline {
    build_outline_with_meta_prompt(repo, None)
}

/// Builds the outline; `meta_prompt` replaces the built-in prompt header when given.
pub fn build_outline_with_meta_prompt(repo: &RepositoryModel, meta_prompt: Option<&str>) -> Outline {
    let sections: Vec<SectionDescriptor> = SectionKind::ALL
        .iter()
        .filter(|kind| kind.applies_to(repo))
        .map(SectionKind::descriptor)
        .collect();

    let metadata = OutlineMetadata {
        project_name: repo.display_name().to_string(),
        primary_language: repo.primary_language(),
        project_type: ProjectType::detect(repo),
        complexity: OutlineComplexity::assess(repo),
        total_sections: sections.len(),
        required_sections: sections.iter().filter(|s| s.required).count(),
    };

    let meta_prompt = meta_prompt.unwrap_or(DEFAULT_META_PROMPT);
    let prompts: BTreeMap<String, String> = sections
        .iter()
        .map(|section| {
            debug!(section = %section.title, "Synthesising section prompt");
            (
                section.title.clone(),
                section_prompt(section, repo, &metadata, meta_prompt),
            )
        })
        .collect();

    info!(
        project = %metadata.project_name,
        sections = sections.len(),
        project_type = %metadata.project_type,
        "Outline built"
    );

    Outline {
        project_name: metadata.project_name.clone(),
        sections,
        metadata,
        prompts,
    }
}

fn section_prompt(
    section: &SectionDescriptor,
    repo: &RepositoryModel,
    metadata: &OutlineMetadata,
    meta_prompt: &str,
) -> String {
    let kind = SectionKind::from_title(&section.title);
    let instructions = kind
        .map(|k| {
            k.instructions()
                .iter()
                .map(|line| format!("- {line}"))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_else(|| "- Follow the section description".to_string());
    let data = kind
        .map(|k| k.prompt_data(repo))
        .unwrap_or_else(|| json!({ "name": repo.name }));
    let data = serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string());

    format!(
        "{meta_prompt}\n\n## Context\n\nProject: {project}\nPrimary Language: {language}\nProject Type: {project_type}\nComplexity: {complexity}\n\n## Section to Generate: {title}\n{description}\n\n## Specific Instructions\n{instructions}\n\n## Repository Data\n```json\n{data}\n```\n\n## Output Requirements\n- Write in clear, professional markdown\n- Include code examples where appropriate\n- Be concise but comprehensive\n- Follow technical writing best practices\n",
        project = metadata.project_name,
        language = metadata.primary_language,
        project_type = metadata.project_type,
        complexity = metadata.complexity.as_str(),
        title = section.title,
        description = section.description,
    )
}
