use repo_docgen::context::{load_context, meta_prompt, META_PROMPT_FILE};
use std::fs;
use tempfile::TempDir;

#[test]
fn reads_project_docs_and_lists_past_outputs() {
    let prompts = TempDir::new().expect("prompts dir");
    fs::write(prompts.path().join("style.md"), "Prefer short sentences.").expect("write");
    fs::write(prompts.path().join("notes.txt"), "ignored").expect("write");
    fs::create_dir(prompts.path().join("nested.md")).expect("dir named like markdown");

    let output = TempDir::new().expect("output dir");
    fs::write(output.path().join("widget_documentation.md"), "# Widget").expect("write");
    fs::write(output.path().join("widget_summary.md"), "summary").expect("write");

    let context = load_context(Some(prompts.path()), output.path());
    assert_eq!(context.project_docs.len(), 1);
    assert_eq!(context.project_docs["style.md"], "Prefer short sentences.");
    assert_eq!(context.past_outputs, vec!["widget_documentation.md".to_string()]);
    assert!(!context.is_empty());
    assert!(meta_prompt(&context).is_none());
}

#[test]
fn missing_directories_give_empty_context() {
    let dir = TempDir::new().expect("tempdir");
    let context = load_context(Some(&dir.path().join("absent")), &dir.path().join("also-absent"));
    assert!(context.is_empty());
}

#[test]
fn meta_prompt_file_is_picked_up_unless_blank() {
    let prompts = TempDir::new().expect("prompts dir");
    let output = TempDir::new().expect("output dir");
    fs::write(prompts.path().join(META_PROMPT_FILE), "Always include a FAQ.").expect("write");
    let context = load_context(Some(prompts.path()), output.path());
    assert_eq!(meta_prompt(&context), Some("Always include a FAQ."));

    fs::write(prompts.path().join(META_PROMPT_FILE), "  \n").expect("write");
    let context = load_context(Some(prompts.path()), output.path());
    assert_eq!(meta_prompt(&context), None);
}
