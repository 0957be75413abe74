//! Section rendering as an ordered list of strategies.
//!
//! Each [`RenderStrategy`] either produces content, declines with `Ok(None)`, or
//! fails. The first strategy that produces content wins. A failure stops the
//! chain and substitutes fallback content, so every descriptor always yields
//! exactly one [`RenderedSection`].

mod guides;
mod templates;

pub use templates::{Ecosystem, TemplateContext};

use crate::contract::{AiContext, Outline, RenderedDocument, RenderedSection, SectionDescriptor};
use crate::error::DocgenError;
use crate::model::RepositoryModel;
use crate::outline::SectionKind;
use tracing::{debug, error, info, warn};

/// Everything a strategy may look at when rendering one section.
pub struct RenderRequest<'a> {
    pub descriptor: &'a SectionDescriptor,
    /// `None` when the title is not part of the known catalog.
    pub kind: Option<SectionKind>,
    pub context: &'a AiContext,
    pub template: &'a TemplateContext<'a>,
}

pub trait RenderStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` passes the request on to the next strategy.
    fn render(&self, request: &RenderRequest<'_>) -> Result<Option<String>, DocgenError>;
}

const AI_ASSISTED_NOTE: &str = "> This project follows AI-assisted engineering principles with prompt chaining and meta-prompting strategies.";

/// Applies when earlier outputs or project docs exist; renders the template and may append a note.
pub struct ContextAwareStrategy;

impl RenderStrategy for ContextAwareStrategy {
    fn name(&self) -> &'static str {
        "context_aware"
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<Option<String>, DocgenError> {
        if request.context.is_empty() {
            return Ok(None);
        }
        let mut content = match request.kind {
            Some(kind) => render_template(kind, request)?,
            None => return Ok(None),
        };
        let mentions_prompting = request
            .context
            .project_docs
            .values()
            .any(|doc| doc.to_lowercase().contains("prompt"));
        if mentions_prompting && request.kind == Some(SectionKind::ProjectSummary) {
            content.push_str("\n\n");
            content.push_str(AI_ASSISTED_NOTE);
            content.push('\n');
        }
        Ok(Some(content))
    }
}

/// Per-kind template functions.
pub struct TemplateStrategy;

impl RenderStrategy for TemplateStrategy {
    fn name(&self) -> &'static str {
        "template"
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<Option<String>, DocgenError> {
        match request.kind {
            Some(kind) => render_template(kind, request).map(Some),
            None => Ok(None),
        }
    }
}

/// Last resort for titles outside the catalog.
pub struct PlaceholderStrategy;

impl RenderStrategy for PlaceholderStrategy {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<Option<String>, DocgenError> {
        let descriptor = request.descriptor;
        let description = if descriptor.description.trim().is_empty() {
            "No description available."
        } else {
            descriptor.description.as_str()
        };
        Ok(Some(format!(
            "## {}\n\n{}\n\n*This section requires manual completion.*",
            descriptor.title, description
        )))
    }
}

fn render_template(kind: SectionKind, request: &RenderRequest<'_>) -> Result<String, DocgenError> {
    let ctx = request.template;
    let rendered = match kind {
        SectionKind::ProjectSummary => templates::project_summary(ctx),
        SectionKind::KeyFeatures => templates::key_features(ctx),
        SectionKind::TechnologyStack => templates::technology_stack(ctx),
        SectionKind::SetupInstructions => templates::setup_instructions(ctx),
        SectionKind::Configuration => templates::configuration(ctx),
        SectionKind::Usage => templates::usage(ctx),
        SectionKind::ApiDocumentation => templates::api_documentation(ctx),
        SectionKind::ProjectStructure => guides::project_structure(ctx),
        SectionKind::Components => guides::components(ctx),
        SectionKind::ExecutionPlan => guides::execution_plan(ctx),
        SectionKind::DevelopmentWorkflow => guides::development_workflow(ctx),
        SectionKind::TestingStrategy => guides::testing_strategy(ctx),
        SectionKind::DeploymentChecklist => guides::deployment_checklist(ctx),
        SectionKind::Troubleshooting => guides::troubleshooting(ctx),
        SectionKind::PerformanceOptimization => guides::performance(ctx),
        SectionKind::Contributing => guides::contributing(ctx),
        SectionKind::License => guides::license(ctx),
    };
    rendered.map_err(|e| DocgenError::render(kind.title(), e.to_string()))
}

/// Content used when a strategy fails.
pub fn fallback_content(title: &str) -> String {
    format!("## {title}\n\nThis section needs to be filled with relevant information about the project.")
}

pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

pub struct SectionRenderer {
    strategies: Vec<Box<dyn RenderStrategy>>,
}

impl Default for SectionRenderer {
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(ContextAwareStrategy),
            Box::new(TemplateStrategy),
            Box::new(PlaceholderStrategy),
        ])
    }
}

impl SectionRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategies(strategies: Vec<Box<dyn RenderStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn render_section(
        &self,
        descriptor: &SectionDescriptor,
        repo: &RepositoryModel,
        context: &AiContext,
    ) -> RenderedSection {
        let template = TemplateContext::new(repo);
        self.render_with(descriptor, context, &template)
    }

    /// Renders every outline section in outline order.
    pub fn render_outline(
        &self,
        outline: &Outline,
        repo: &RepositoryModel,
        context: &AiContext,
    ) -> RenderedDocument {
        let template = TemplateContext::new(repo);
        let total = outline.sections.len();
        let sections = outline
            .sections
            .iter()
            .enumerate()
            .map(|(i, descriptor)| {
                debug!(section = %descriptor.title, index = i + 1, total, "Rendering section");
                self.render_with(descriptor, context, &template)
            })
            .collect::<Vec<_>>();

        let document = RenderedDocument {
            project_name: outline.project_name.clone(),
            metadata: outline.metadata.clone(),
            sections,
        };
        info!(
            sections = document.sections.len(),
            words = document.total_words(),
            fallbacks = document.fallback_count(),
            "All sections rendered"
        );
        document
    }

    fn render_with(
        &self,
        descriptor: &SectionDescriptor,
        context: &AiContext,
        template: &TemplateContext<'_>,
    ) -> RenderedSection {
        let request = RenderRequest {
            descriptor,
            kind: SectionKind::from_title(&descriptor.title),
            context,
            template,
        };

        let mut failure: Option<String> = None;
        let mut produced: Option<(String, &'static str)> = None;
        for strategy in &self.strategies {
            match strategy.render(&request) {
                Ok(Some(content)) if !content.trim().is_empty() => {
                    produced = Some((content, strategy.name()));
                    break;
                }
                Ok(_) => continue,
                Err(e) => {
                    error!(
                        section = %descriptor.title,
                        strategy = strategy.name(),
                        error = %e,
                        "Section rendering failed, using fallback content"
                    );
                    failure = Some(e.to_string());
                    break;
                }
            }
        }

        let (content, strategy, fallback_used) = match produced {
            Some((content, name)) => (content, name, false),
            None => {
                if failure.is_none() {
                    warn!(section = %descriptor.title, "No strategy produced content, using fallback");
                }
                (fallback_content(&descriptor.title), "fallback", true)
            }
        };

        let words = word_count(&content);
        debug!(section = %descriptor.title, strategy, words, "Section rendered");
        RenderedSection {
            title: descriptor.title.clone(),
            word_count: words,
            content,
            priority: descriptor.priority,
            required: descriptor.required,
            description: descriptor.description.clone(),
            fallback_used,
            strategy: strategy.to_string(),
            error: failure,
        }
    }
}
