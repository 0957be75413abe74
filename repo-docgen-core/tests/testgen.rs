use repo_docgen_core::model::RepositoryModel;
use repo_docgen_core::project_type::Complexity;
use repo_docgen_core::testgen::{coverage_target, generate, priority_files, TestStrategy};

fn repo_with(language: &str, files: &[&str]) -> RepositoryModel {
    let mut repo = RepositoryModel {
        name: "demo".to_string(),
        files: files.iter().map(|f| f.to_string()).collect(),
        ..RepositoryModel::default()
    };
    repo.languages.insert(language.to_string(), files.len());
    repo
}

#[test]
fn strategy_follows_file_count() {
    assert_eq!(TestStrategy::for_file_count(0), TestStrategy::Lightweight);
    assert_eq!(TestStrategy::for_file_count(9), TestStrategy::Lightweight);
    assert_eq!(TestStrategy::for_file_count(10), TestStrategy::Standard);
    assert_eq!(TestStrategy::for_file_count(49), TestStrategy::Standard);
    assert_eq!(TestStrategy::for_file_count(50), TestStrategy::Comprehensive);
}

#[test]
fn coverage_target_follows_complexity() {
    assert_eq!(coverage_target(Complexity::Low), 70);
    assert_eq!(coverage_target(Complexity::Medium), 80);
    assert_eq!(coverage_target(Complexity::High), 90);
}

#[test]
fn priority_files_skip_tests_and_vendored_code() {
    let repo = repo_with(
        "python",
        &[
            "app.py",
            "src/service.py",
            "tests/test_app.py",
            "node_modules/lib/index.js",
            "README.md",
            "scripts/tool.py",
        ],
    );
    assert_eq!(priority_files(&repo), vec!["app.py", "src/service.py"]);
}

#[test]
fn python_repo_gets_pytest_skeletons_and_plan() {
    let plan = generate(&repo_with("python", &["app.py", "src/service.py"]));
    assert_eq!(plan.strategy, TestStrategy::Lightweight);
    assert_eq!(plan.coverage_target, 70);
    assert!(plan.frameworks.iter().any(|f| f == "pytest"));

    let paths: Vec<&str> = plan.files.iter().map(|f| f.path.as_str()).collect();
    assert!(paths.contains(&"test_app.py"));
    assert!(paths.contains(&"test_src_service.py"));
    assert!(paths.contains(&"TEST_PLAN.md"));

    let skeleton = plan
        .files
        .iter()
        .find(|f| f.path == "test_app.py")
        .expect("app skeleton");
    assert!(skeleton.content.contains("import pytest"));
    assert!(skeleton.content.contains("importlib.util.find_spec(\"app\")"));
}

#[test]
fn rust_repo_gets_test_attribute_skeletons() {
    let plan = generate(&repo_with("rust", &["src/lib.rs"]));
    let skeleton = plan
        .files
        .iter()
        .find(|f| f.path == "src_lib_test.rs")
        .expect("rust skeleton");
    assert!(skeleton.content.contains("#[test]"));
}

#[test]
fn same_file_name_in_different_directories_gets_distinct_skeletons() {
    let plan = generate(&repo_with("python", &["src/main.py", "api/main.py"]));
    let paths: Vec<&str> = plan.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["test_src_main.py", "test_api_main.py", "TEST_PLAN.md"]);

    let api = plan
        .files
        .iter()
        .find(|f| f.path == "test_api_main.py")
        .expect("api skeleton");
    assert!(api.content.contains("Tests for api/main.py"));
    assert!(api.content.contains("find_spec(\"main\")"));
}

#[test]
fn unknown_language_still_gets_checklist() {
    let plan = generate(&RepositoryModel::default());
    assert_eq!(plan.files.len(), 1);
    assert_eq!(plan.files[0].path, "TEST_PLAN.md");
    assert!(plan.files[0].content.contains("Add tests for the main entry point"));
}
