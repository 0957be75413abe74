use proptest::prelude::*;
use repo_docgen_core::contract::{AiContext, Priority, SectionDescriptor};
use repo_docgen_core::model::RepositoryModel;
use repo_docgen_core::outline::{build_outline, SectionKind};
use repo_docgen_core::render::{
    fallback_content, word_count, PlaceholderStrategy, RenderRequest, RenderStrategy,
    SectionRenderer, TemplateStrategy,
};
use repo_docgen_core::DocgenError;
use std::collections::BTreeMap;

struct Exploding;

impl RenderStrategy for Exploding {
    fn name(&self) -> &'static str {
        "exploding"
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<Option<String>, DocgenError> {
        Err(DocgenError::render(&request.descriptor.title, "template blew up"))
    }
}

fn rust_repo() -> RepositoryModel {
    let mut repo = RepositoryModel {
        name: "ferris".to_string(),
        ..RepositoryModel::default()
    };
    repo.languages.insert("rust".to_string(), 12);
    repo.files = vec!["Cargo.toml".to_string(), "src/main.rs".to_string()];
    repo.entry_points = vec!["src/main.rs".to_string()];
    repo
}

fn descriptor(title: &str, description: &str) -> SectionDescriptor {
    SectionDescriptor {
        title: title.to_string(),
        priority: Priority::Medium,
        required: false,
        description: description.to_string(),
        subsections: Vec::new(),
    }
}

#[test]
fn every_catalog_section_renders_from_template() {
    let repo = rust_repo();
    let renderer = SectionRenderer::new();
    for kind in SectionKind::ALL {
        let section = renderer.render_section(&kind.descriptor(), &repo, &AiContext::default());
        assert!(!section.content.trim().is_empty(), "{} is empty", kind.title());
        assert!(!section.fallback_used, "{} fell back", kind.title());
        assert_eq!(section.strategy, "template");
        assert_eq!(section.word_count, word_count(&section.content));
    }
}

#[test]
fn failing_strategy_falls_back_without_aborting() {
    let renderer = SectionRenderer::with_strategies(vec![Box::new(Exploding), Box::new(TemplateStrategy)]);
    let outline = build_outline(&rust_repo());
    let document = renderer.render_outline(&outline, &rust_repo(), &AiContext::default());

    assert_eq!(document.sections.len(), outline.sections.len());
    for section in &document.sections {
        assert!(section.fallback_used);
        assert_eq!(section.strategy, "fallback");
        assert_eq!(section.content, fallback_content(&section.title));
        assert_eq!(section.word_count, word_count(&section.content));
        assert!(section
            .error
            .as_deref()
            .is_some_and(|e| e.contains("template blew up")));
    }
    assert_eq!(document.fallback_count(), document.sections.len());
}

#[test]
fn unknown_title_gets_placeholder() {
    let section = SectionRenderer::new().render_section(
        &descriptor("Release Calendar", "When versions ship."),
        &rust_repo(),
        &AiContext::default(),
    );
    assert_eq!(section.strategy, "placeholder");
    assert!(!section.fallback_used);
    assert_eq!(
        section.content,
        "## Release Calendar\n\nWhen versions ship.\n\n*This section requires manual completion.*"
    );
}

#[test]
fn no_strategy_producing_content_uses_fallback() {
    let renderer = SectionRenderer::with_strategies(vec![Box::new(TemplateStrategy)]);
    let section = renderer.render_section(
        &descriptor("Release Calendar", ""),
        &rust_repo(),
        &AiContext::default(),
    );
    assert!(section.fallback_used);
    assert!(section.error.is_none());
    assert_eq!(section.content, fallback_content("Release Calendar"));
}

#[test]
fn context_adds_note_to_summary_only() {
    let context = AiContext {
        project_docs: BTreeMap::from([(
            "notes.md".to_string(),
            "We rely on prompt chaining.".to_string(),
        )]),
        past_outputs: Vec::new(),
    };
    let renderer = SectionRenderer::new();
    let summary = renderer.render_section(&SectionKind::ProjectSummary.descriptor(), &rust_repo(), &context);
    assert_eq!(summary.strategy, "context_aware");
    assert!(summary.content.contains("AI-assisted engineering principles"));

    let usage = renderer.render_section(&SectionKind::Usage.descriptor(), &rust_repo(), &context);
    assert_eq!(usage.strategy, "context_aware");
    assert!(!usage.content.contains("AI-assisted engineering principles"));
}

#[test]
fn past_outputs_alone_enable_context_strategy() {
    let context = AiContext {
        project_docs: BTreeMap::new(),
        past_outputs: vec!["ferris_documentation.md".to_string()],
    };
    let section = SectionRenderer::new().render_section(
        &SectionKind::ProjectSummary.descriptor(),
        &rust_repo(),
        &context,
    );
    assert_eq!(section.strategy, "context_aware");
    assert!(!section.content.contains("AI-assisted engineering principles"));
}

#[test]
fn default_strategy_order() {
    assert_eq!(
        SectionRenderer::new().strategy_names(),
        vec!["context_aware", "template", "placeholder"]
    );
    assert_eq!(PlaceholderStrategy.name(), "placeholder");
}

proptest! {
    #[test]
    fn word_count_matches_whitespace_tokens(text in "[a-z \\t\\n]{0,200}") {
        prop_assert_eq!(word_count(&text), text.split_whitespace().count());
    }

    #[test]
    fn any_descriptor_renders_non_empty(title in "[A-Za-z][A-Za-z ]{0,30}", description in "[a-z ]{0,60}") {
        let section = SectionRenderer::new().render_section(
            &descriptor(&title, &description),
            &RepositoryModel::default(),
            &AiContext::default(),
        );
        prop_assert!(!section.content.trim().is_empty());
        prop_assert_eq!(section.word_count, word_count(&section.content));
    }
}
