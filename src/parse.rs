//! Walks a working copy and builds the [`RepositoryModel`] the pipeline consumes.
//!
//! Only an unreadable repository root is an error. Unreadable subdirectories,
//! undecodable files and malformed manifests are logged and skipped.

use regex::Regex;
use repo_docgen_core::model::{
    NodeKind, Readme, ReadmeSection, RepositoryModel, Statistics, Structure, TestInventory, TreeNode,
};
use repo_docgen_core::DocgenError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

pub const SKIPPED_DIRS: &[&str] = &[
    ".git",
    "target",
    "node_modules",
    "__pycache__",
    ".venv",
    "dist",
    "build",
];

const README_NAMES: &[&str] = &[
    "README.md",
    "README.rst",
    "README.txt",
    "README",
    "readme.md",
    "readme.rst",
    "readme.txt",
    "readme",
];

/// Dependency manifests looked up at the repository root, keyed by ecosystem.
const DEPENDENCY_FILES: &[(&str, &str)] = &[
    ("python", "requirements.txt"),
    ("python", "pyproject.toml"),
    ("node", "package.json"),
    ("rust", "Cargo.toml"),
    ("go", "go.mod"),
    ("java", "pom.xml"),
    ("ruby", "Gemfile"),
];

const LANGUAGE_EXTENSIONS: &[(&str, &[&str])] = &[
    ("python", &["py", "pyw"]),
    ("javascript", &["js", "jsx", "mjs"]),
    ("typescript", &["ts", "tsx"]),
    ("java", &["java"]),
    ("go", &["go"]),
    ("rust", &["rs"]),
    ("cpp", &["cpp", "cc", "cxx", "c++"]),
    ("c", &["c"]),
    ("csharp", &["cs"]),
    ("php", &["php"]),
    ("ruby", &["rb"]),
    ("swift", &["swift"]),
    ("kotlin", &["kt", "kts"]),
    ("scala", &["scala"]),
    ("html", &["html", "htm"]),
    ("css", &["css", "scss", "sass"]),
    ("shell", &["sh", "bash", "zsh"]),
    ("yaml", &["yml", "yaml"]),
    ("json", &["json"]),
    ("xml", &["xml"]),
    ("markdown", &["md", "markdown"]),
];

const CODE_EXTENSIONS: &[&str] = &["py", "js", "ts", "java", "go", "rs", "cpp", "c", "cs", "php", "rb"];

const CONFIG_FILES: &[&str] = &[
    ".env",
    ".env.example",
    ".env.template",
    "config.json",
    "config.yaml",
    "config.yml",
    ".gitignore",
    ".dockerignore",
    "Makefile",
    "makefile",
    "Dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
];

const ENTRY_POINTS: &[&str] = &[
    "main.py",
    "app.py",
    "server.py",
    "run.py",
    "index.js",
    "app.js",
    "server.js",
    "main.js",
    "Main.java",
    "Application.java",
    "main.go",
    "main.rs",
    "src/main.rs",
    "src/index.js",
    "src/index.ts",
];

const TEST_DIRS: &[&str] = &["test", "tests", "spec", "__tests__"];
const DOC_DIRS: &[&str] = &["docs", "doc", "documentation"];
const ROOT_CI_FILES: &[&str] = &[
    ".gitlab-ci.yml",
    ".travis.yml",
    "circle.yml",
    ".circleci/config.yml",
    "appveyor.yml",
    "azure-pipelines.yml",
    "Jenkinsfile",
];
const LICENSE_FILES: &[&str] = &["LICENSE", "LICENSE.txt", "LICENSE.md", "COPYING"];

const TREE_DEPTH: usize = 3;

#[derive(Default)]
struct Walk {
    files: Vec<String>,
    directories: usize,
    max_depth: usize,
    total_lines: usize,
    code_files: usize,
}

fn extension(path: &str) -> Option<String> {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.rsplit_once('.')
        .filter(|(stem, _)| !stem.is_empty())
        .map(|(_, ext)| ext.to_lowercase())
}

fn is_skipped(name: &str) -> bool {
    SKIPPED_DIRS.contains(&name)
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

fn visit_dir(dir: &Path, repo_path: &Path, depth: usize, walk: &mut Walk) {
    let entries = match sorted_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = ?e, path = %dir.display(), "Skipping unreadable directory");
            return;
        }
    };

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.is_dir() {
            if is_skipped(&name) {
                debug!(path = %path.display(), "Skipping directory");
                continue;
            }
            walk.directories += 1;
            walk.max_depth = walk.max_depth.max(depth + 1);
            visit_dir(&path, repo_path, depth + 1, walk);
        } else if path.is_file() {
            let Ok(relative) = path.strip_prefix(repo_path) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if extension(&relative).is_some_and(|ext| CODE_EXTENSIONS.contains(&ext.as_str())) {
                walk.code_files += 1;
                match fs::read_to_string(&path) {
                    Ok(content) => walk.total_lines += content.lines().count(),
                    Err(e) => debug!(error = ?e, path = %path.display(), "Not counting lines of undecodable file"),
                }
            }
            walk.files.push(relative);
        }
    }
}

fn count_languages(files: &[String]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for file in files {
        let Some(ext) = extension(file) else { continue };
        if let Some((language, _)) = LANGUAGE_EXTENSIONS
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
        {
            *counts.entry(language.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn build_tree(path: &Path, depth: usize) -> TreeNode {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if !path.is_dir() {
        return TreeNode {
            name,
            kind: NodeKind::File,
            children: Vec::new(),
        };
    }

    let mut children = Vec::new();
    if depth < TREE_DEPTH {
        if let Ok(entries) = sorted_entries(path) {
            let mut entries: Vec<_> = entries
                .into_iter()
                .filter(|e| {
                    let n = e.file_name().to_string_lossy().into_owned();
                    !n.starts_with('.') && !is_skipped(&n)
                })
                .collect();
            // Directories first, then files, each alphabetical.
            entries.sort_by_key(|e| (e.path().is_file(), e.file_name().to_string_lossy().to_lowercase()));
            children = entries
                .iter()
                .map(|e| build_tree(&e.path(), depth + 1))
                .collect();
        }
    }
    TreeNode {
        name,
        kind: NodeKind::Directory,
        children,
    }
}

fn analyze_structure(repo_path: &Path, walk: &Walk) -> Structure {
    let mut root_files = Vec::new();
    let mut directories = Vec::new();
    if let Ok(entries) = sorted_entries(repo_path) {
        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if entry.path().is_dir() {
                if !is_skipped(&name) {
                    directories.push(name);
                }
            } else {
                root_files.push(name);
            }
        }
    }

    Structure {
        root_files,
        directories,
        total_files: walk.files.len(),
        max_depth: walk.max_depth,
        tree: Some(build_tree(repo_path, 0)),
    }
}

fn badge_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[[^\]]*\]\((https://[^)\s]+)\)").ok())
        .as_ref()
}

fn link_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").ok())
        .as_ref()
}

/// Splits markdown on `#` heading lines; text before the first heading is dropped.
pub fn readme_sections(content: &str) -> Vec<ReadmeSection> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;
    let mut in_fence = false;

    for line in content.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        }
        if !in_fence && line.starts_with('#') {
            if let Some((title, body)) = current.take() {
                sections.push(ReadmeSection {
                    title,
                    content: body.join("\n").trim().to_string(),
                });
            }
            current = Some((line.trim_start_matches('#').trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((title, body)) = current {
        sections.push(ReadmeSection {
            title,
            content: body.join("\n").trim().to_string(),
        });
    }
    sections
}

fn parse_readme(repo_path: &Path) -> Readme {
    let Some(filename) = README_NAMES.iter().find(|n| repo_path.join(n).is_file()) else {
        return Readme::default();
    };
    let path = repo_path.join(filename);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!(error = ?e, path = %path.display(), "Could not read README");
            return Readme {
                found: true,
                filename: Some(filename.to_string()),
                ..Readme::default()
            };
        }
    };

    let badges = badge_regex()
        .map(|re| {
            re.captures_iter(&content)
                .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
                .collect()
        })
        .unwrap_or_default();
    let links = link_regex()
        .map(|re| {
            re.captures_iter(&content)
                .filter_map(|c| c.get(2).map(|m| m.as_str().to_string()))
                .collect()
        })
        .unwrap_or_default();

    Readme {
        found: true,
        filename: Some(filename.to_string()),
        sections: readme_sections(&content),
        badges,
        links,
        content,
    }
}

/// Package name from a requirement specifier such as `requests[socks]>=2.0; python_version>"3"`.
fn requirement_name(spec: &str) -> Option<String> {
    let name: String = spec
        .trim()
        .chars()
        .take_while(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();
    (!name.is_empty()).then_some(name)
}

fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with('-'))
        .filter_map(requirement_name)
        .collect()
}

fn parse_package_json(content: &str) -> Vec<String> {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(value) => ["dependencies", "devDependencies", "peerDependencies"]
            .iter()
            .filter_map(|key| value.get(key).and_then(|v| v.as_object()))
            .flat_map(|deps| deps.keys().cloned())
            .collect(),
        Err(e) => {
            warn!(error = %e, "package.json is not valid JSON");
            Vec::new()
        }
    }
}

const CARGO_TABLES: &[&str] = &["dependencies", "dev-dependencies", "build-dependencies"];

fn parse_toml(file: &str, content: &str) -> Option<toml::Value> {
    match toml::from_str::<toml::Value>(content) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn!(file, error = %e, "Manifest is not valid TOML");
            None
        }
    }
}

fn table_keys(value: Option<&toml::Value>) -> Vec<String> {
    value
        .and_then(toml::Value::as_table)
        .map(|table| table.keys().cloned().collect())
        .unwrap_or_default()
}

fn requirement_names(value: Option<&toml::Value>) -> Vec<String> {
    value
        .and_then(toml::Value::as_array)
        .map(|specs| {
            specs
                .iter()
                .filter_map(toml::Value::as_str)
                .filter_map(requirement_name)
                .collect()
        })
        .unwrap_or_default()
}

/// Crate names from the top-level, `target.*` and `workspace` dependency tables.
fn parse_cargo_toml(content: &str) -> Vec<String> {
    let Some(manifest) = parse_toml("Cargo.toml", content) else {
        return Vec::new();
    };
    let mut names: Vec<String> = CARGO_TABLES
        .iter()
        .flat_map(|table| table_keys(manifest.get(*table)))
        .collect();
    if let Some(targets) = manifest.get("target").and_then(toml::Value::as_table) {
        for target in targets.values() {
            names.extend(CARGO_TABLES.iter().flat_map(|table| table_keys(target.get(*table))));
        }
    }
    names.extend(table_keys(
        manifest.get("workspace").and_then(|w| w.get("dependencies")),
    ));
    names
}

/// PEP 621 `project` arrays plus the poetry tables, without the `python` pin.
fn parse_pyproject(content: &str) -> Vec<String> {
    let Some(manifest) = parse_toml("pyproject.toml", content) else {
        return Vec::new();
    };
    let project = manifest.get("project");
    let mut names = requirement_names(project.and_then(|p| p.get("dependencies")));
    if let Some(extras) = project
        .and_then(|p| p.get("optional-dependencies"))
        .and_then(toml::Value::as_table)
    {
        for specs in extras.values() {
            names.extend(requirement_names(Some(specs)));
        }
    }

    if let Some(poetry) = manifest.get("tool").and_then(|t| t.get("poetry")) {
        names.extend(table_keys(poetry.get("dependencies")));
        names.extend(table_keys(poetry.get("dev-dependencies")));
        if let Some(groups) = poetry.get("group").and_then(toml::Value::as_table) {
            for group in groups.values() {
                names.extend(table_keys(group.get("dependencies")));
            }
        }
    }
    names.retain(|n| n != "python");
    names
}

fn parse_go_mod(content: &str) -> Vec<String> {
    let mut in_block = false;
    let mut names = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with("require (") {
            in_block = true;
            continue;
        }
        if in_block && line == ")" {
            in_block = false;
            continue;
        }
        let spec = if in_block {
            Some(line)
        } else {
            line.strip_prefix("require ")
        };
        if let Some(module) = spec.and_then(|s| s.split_whitespace().next()) {
            if !module.starts_with("//") {
                names.push(module.to_string());
            }
        }
    }
    names
}

fn pom_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<dependency>.*?<artifactId>\s*([^<\s]+)\s*</artifactId>").ok()
    })
    .as_ref()
}

fn gem_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?m)^\s*gem\s+['"]([^'"]+)['"]"#).ok())
        .as_ref()
}

fn captures(re: Option<&'static Regex>, content: &str) -> Vec<String> {
    re.map(|re| {
        re.captures_iter(content)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect()
    })
    .unwrap_or_default()
}

fn parse_dependency_file(file: &str, content: &str) -> Vec<String> {
    match file {
        "requirements.txt" => parse_requirements(content),
        "pyproject.toml" => parse_pyproject(content),
        "package.json" => parse_package_json(content),
        "Cargo.toml" => parse_cargo_toml(content),
        "go.mod" => parse_go_mod(content),
        "pom.xml" => captures(pom_regex(), content),
        "Gemfile" => captures(gem_regex(), content),
        _ => Vec::new(),
    }
}

fn parse_dependencies(repo_path: &Path) -> BTreeMap<String, BTreeMap<String, Vec<String>>> {
    let mut dependencies: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
    for (language, file) in DEPENDENCY_FILES {
        let path = repo_path.join(file);
        if !path.is_file() {
            continue;
        }
        match fs::read_to_string(&path) {
            Ok(content) => {
                let names = parse_dependency_file(file, &content);
                debug!(file, count = names.len(), "Parsed dependency manifest");
                dependencies
                    .entry(language.to_string())
                    .or_default()
                    .insert(file.to_string(), names);
            }
            Err(e) => warn!(error = ?e, path = %path.display(), "Could not read dependency manifest"),
        }
    }
    dependencies
}

fn existing(repo_path: &Path, candidates: &[&str]) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| repo_path.join(c).exists())
        .map(|c| c.to_string())
        .collect()
}

fn find_documentation(repo_path: &Path, files: &[String]) -> Vec<String> {
    let mut docs: Vec<String> = DOC_DIRS
        .iter()
        .filter(|d| repo_path.join(d).is_dir())
        .map(|d| format!("{d}/"))
        .collect();
    docs.extend(
        files
            .iter()
            .filter(|f| !f.contains('/') && extension(f).as_deref() == Some("md"))
            .cloned(),
    );
    docs
}

fn is_test_file(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path).to_lowercase();
    file.starts_with("test_")
        || file.ends_with("_test.py")
        || file.ends_with("_test.go")
        || file.ends_with("_test.rs")
        || file.contains(".test.")
        || file.contains(".spec.")
        || (path.starts_with("tests/") && file.ends_with(".rs"))
}

fn detect_test_frameworks(
    files: &[String],
    dependencies: &BTreeMap<String, BTreeMap<String, Vec<String>>>,
) -> Vec<String> {
    let deps: Vec<String> = dependencies
        .values()
        .flat_map(|f| f.values())
        .flatten()
        .map(|d| d.to_lowercase())
        .collect();
    let has_dep = |name: &str| deps.iter().any(|d| d.contains(name));
    let has_file = |needle: &str| files.iter().any(|f| f.to_lowercase().contains(needle));

    let mut frameworks = Vec::new();
    if has_dep("pytest") || has_file("conftest.py") || has_file("pytest.ini") {
        frameworks.push("pytest");
    }
    if has_dep("jest") || has_file("jest.config") {
        frameworks.push("jest");
    }
    if has_dep("mocha") {
        frameworks.push("mocha");
    }
    if has_dep("vitest") {
        frameworks.push("vitest");
    }
    if has_dep("junit") {
        frameworks.push("junit");
    }
    if dependencies.contains_key("rust") {
        frameworks.push("cargo test");
    }
    if files.iter().any(|f| f.ends_with("_test.go")) {
        frameworks.push("go test");
    }
    frameworks.into_iter().map(String::from).collect()
}

fn find_tests(
    repo_path: &Path,
    files: &[String],
    dependencies: &BTreeMap<String, BTreeMap<String, Vec<String>>>,
) -> TestInventory {
    TestInventory {
        directories: TEST_DIRS
            .iter()
            .filter(|d| repo_path.join(d).is_dir())
            .map(|d| format!("{d}/"))
            .collect(),
        files: files.iter().filter(|f| is_test_file(f)).cloned().collect(),
        frameworks: detect_test_frameworks(files, dependencies),
    }
}

fn find_ci_cd(repo_path: &Path, files: &[String]) -> Vec<String> {
    let mut ci: Vec<String> = files
        .iter()
        .filter(|f| {
            f.starts_with(".github/workflows/")
                && matches!(extension(f).as_deref(), Some("yml") | Some("yaml"))
        })
        .cloned()
        .collect();
    ci.extend(existing(repo_path, ROOT_CI_FILES));
    ci
}

/// Parses the working copy at `repo_path`. `name` overrides the directory name.
pub fn parse_repository(repo_path: &Path, name: Option<&str>) -> Result<RepositoryModel, DocgenError> {
    info!(path = %repo_path.display(), "Parsing repository structure");
    if let Err(e) = fs::read_dir(repo_path) {
        warn!(error = ?e, path = %repo_path.display(), "Repository root is not readable");
        return Err(DocgenError::Io(e));
    }

    let mut walk = Walk::default();
    visit_dir(repo_path, repo_path, 0, &mut walk);

    let dependencies = parse_dependencies(repo_path);
    let structure = analyze_structure(repo_path, &walk);
    let name = name.map(str::to_string).unwrap_or_else(|| {
        repo_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let model = RepositoryModel {
        path: repo_path.display().to_string(),
        name,
        languages: count_languages(&walk.files),
        readme: parse_readme(repo_path),
        config_files: existing(repo_path, CONFIG_FILES),
        entry_points: existing(repo_path, ENTRY_POINTS),
        documentation: find_documentation(repo_path, &walk.files),
        tests: find_tests(repo_path, &walk.files, &dependencies),
        ci_cd: find_ci_cd(repo_path, &walk.files),
        license: LICENSE_FILES
            .iter()
            .find(|f| repo_path.join(f).is_file())
            .map(|f| f.to_string()),
        statistics: Statistics {
            total_files: walk.files.len(),
            total_directories: walk.directories,
            total_lines: walk.total_lines,
            code_files: walk.code_files,
        },
        dependencies,
        structure,
        files: walk.files,
    };

    info!(
        name = %model.name,
        files = model.statistics.total_files,
        languages = model.languages.len(),
        primary_language = %model.primary_language(),
        "Repository parsing complete"
    );
    Ok(model)
}
