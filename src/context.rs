//! Loads the [`AiContext`] that lets earlier runs and project notes influence rendering.

use repo_docgen_core::contract::AiContext;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// File in the prompts directory that replaces the built-in outline meta-prompt.
pub const META_PROMPT_FILE: &str = "meta_prompt.md";

const PAST_OUTPUT_SUFFIX: &str = "_documentation.md";

fn markdown_files(dir: &Path) -> Vec<(String, std::path::PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(error = ?e, dir = %dir.display(), "Context directory not readable, skipping");
            return Vec::new();
        }
    };
    let mut files: Vec<(String, std::path::PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|e| (e.file_name().to_string_lossy().into_owned(), e.path()))
        .filter(|(name, path)| name.ends_with(".md") && path.is_file())
        .collect();
    files.sort();
    files
}

/// Reads `*.md` from `prompts_dir` and lists `*_documentation.md` files already in `output_dir`.
///
/// Missing directories yield an empty context.
pub fn load_context(prompts_dir: Option<&Path>, output_dir: &Path) -> AiContext {
    let mut context = AiContext::default();

    if let Some(dir) = prompts_dir {
        for (name, path) in markdown_files(dir) {
            match fs::read_to_string(&path) {
                Ok(content) => {
                    context.project_docs.insert(name, content);
                }
                Err(e) => warn!(error = ?e, path = %path.display(), "Could not read project doc"),
            }
        }
    }

    context.past_outputs = markdown_files(output_dir)
        .into_iter()
        .map(|(name, _)| name)
        .filter(|name| name.ends_with(PAST_OUTPUT_SUFFIX))
        .collect();

    info!(
        project_docs = context.project_docs.len(),
        past_outputs = context.past_outputs.len(),
        "AI context loaded"
    );
    context
}

/// The custom meta-prompt, when the prompts directory provides one.
pub fn meta_prompt(context: &AiContext) -> Option<&str> {
    context
        .project_docs
        .get(META_PROMPT_FILE)
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
}
