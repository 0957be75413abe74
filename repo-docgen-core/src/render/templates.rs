//! Templates for the introductory and setup-oriented sections.

use crate::model::RepositoryModel;
use crate::project_type::{Complexity, ProjectType};
use std::fmt::{self, Write};

/// Package ecosystem, guessed from manifest files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecosystem {
    Node,
    Python,
    Rust,
    Go,
    Java,
    Other,
}

impl Ecosystem {
    pub fn detect(repo: &RepositoryModel) -> Self {
        if repo.has_file("package.json") {
            Ecosystem::Node
        } else if repo.has_file("requirements.txt")
            || repo.has_file("pyproject.toml")
            || repo.has_file("setup.py")
        {
            Ecosystem::Python
        } else if repo.has_file("cargo.toml") {
            Ecosystem::Rust
        } else if repo.has_file("go.mod") {
            Ecosystem::Go
        } else if repo.has_file("pom.xml") || repo.has_file("build.gradle") {
            Ecosystem::Java
        } else {
            Ecosystem::Other
        }
    }

    pub fn install_command(&self) -> &'static str {
        match self {
            Ecosystem::Node => "npm install",
            Ecosystem::Python => "pip install -r requirements.txt",
            Ecosystem::Rust => "cargo build",
            Ecosystem::Go => "go mod download",
            Ecosystem::Java => "mvn install",
            Ecosystem::Other => "make",
        }
    }

    pub fn test_command(&self) -> &'static str {
        match self {
            Ecosystem::Node => "npm test",
            Ecosystem::Python => "pytest",
            Ecosystem::Rust => "cargo test",
            Ecosystem::Go => "go test ./...",
            Ecosystem::Java => "mvn test",
            Ecosystem::Other => "make test",
        }
    }
}

/// Precomputed facts shared by every template of one run.
pub struct TemplateContext<'a> {
    pub repo: &'a RepositoryModel,
    pub project_type: ProjectType,
    pub complexity: Complexity,
    pub primary_language: String,
    pub ecosystem: Ecosystem,
    listing: String,
}

impl<'a> TemplateContext<'a> {
    pub fn new(repo: &'a RepositoryModel) -> Self {
        Self {
            repo,
            project_type: ProjectType::detect(repo),
            complexity: Complexity::assess(repo),
            primary_language: repo.primary_language(),
            ecosystem: Ecosystem::detect(repo),
            listing: repo.file_listing().to_lowercase(),
        }
    }

    pub fn name(&self) -> &str {
        self.repo.display_name()
    }

    /// Case-insensitive substring search over the file listing.
    pub fn mentions(&self, needle: &str) -> bool {
        self.listing.contains(&needle.to_lowercase())
    }

    pub fn mentions_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.mentions(n))
    }

    pub(crate) fn type_words(&self) -> String {
        self.project_type.as_str().replace('_', " ")
    }
}

pub(super) fn project_summary(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Project Summary & Goals\n")?;
    writeln!(out, "**Primary Language:** {}", ctx.primary_language)?;
    writeln!(out, "**Project Type:** {}", ctx.project_type.title())?;
    writeln!(out, "**Complexity:** {}\n", capitalise(ctx.complexity.as_str()))?;

    writeln!(out, "### Overview\n")?;
    let readme_intro = ctx
        .repo
        .readme
        .sections
        .iter()
        .find(|s| s.title.trim().is_empty() || s.content.len() > 50)
        .map(|s| truncate_chars(s.content.trim(), 500))
        .filter(|s| !s.is_empty());
    match readme_intro {
        Some(intro) => writeln!(out, "{intro}\n")?,
        None => writeln!(
            out,
            "{} is a {} project built primarily with {}. The codebase spans {} files across {} languages. \
             This document describes how the project is organised, how to set it up, and how to work on it.\n",
            ctx.name(),
            ctx.type_words(),
            ctx.primary_language,
            ctx.repo.total_files(),
            ctx.repo.languages.len()
        )?,
    }

    writeln!(out, "### Primary Goals\n")?;
    let goals: &[(&str, &str)] = match ctx.project_type {
        ProjectType::WebFrontend => &[
            ("Interactive Experience", "Provide an engaging user interface built on modern web technologies"),
            ("Performance", "Keep loading times short and interactions responsive"),
            ("Accessibility", "Stay usable across devices and assistive technologies"),
        ],
        ProjectType::WebApi => &[
            ("Robust API", "Serve reliable and predictable endpoints"),
            ("Performance", "Respond quickly and process data efficiently"),
            ("Security", "Validate input and protect credentials"),
            ("Documentation", "Keep the endpoint reference current"),
        ],
        ProjectType::Library => &[
            ("Stable Interface", "Offer a small, well-documented public API"),
            ("Correctness", "Back every public function with tests"),
            ("Portability", "Work across the supported platforms and runtimes"),
        ],
        _ => &[
            ("Functionality", "Deliver the core features reliably"),
            ("Maintainability", "Keep the codebase clean and extensible"),
            ("Quality", "Protect behaviour with automated tests"),
        ],
    };
    for (goal, text) in goals {
        writeln!(out, "- **{goal}:** {text}")?;
    }

    writeln!(out, "\n### Target Audience\n")?;
    writeln!(out, "- Developers who use or extend {}", ctx.name())?;
    writeln!(out, "- Maintainers reviewing changes and releases")?;
    writeln!(out, "- New contributors getting familiar with the codebase\n")?;

    writeln!(out, "### Success Metrics\n")?;
    let has_tests = !ctx.repo.tests.files.is_empty() || !ctx.repo.tests.directories.is_empty();
    if has_tests {
        writeln!(out, "- Test suite passes on every change ({} test files today)", ctx.repo.tests.files.len())?;
    } else {
        writeln!(out, "- An automated test suite exists and runs on every change")?;
    }
    if ctx.repo.ci_cd.is_empty() {
        writeln!(out, "- Continuous integration is configured")?;
    } else {
        writeln!(out, "- Continuous integration stays green ({})", ctx.repo.ci_cd.join(", "))?;
    }
    writeln!(out, "- New contributors can run the project from these instructions alone")?;
    Ok(out)
}

const FEATURE_INDICATORS: &[(&str, &[&str])] = &[
    ("Authentication", &["auth", "login", "jwt", "passport"]),
    ("Database", &["db", "database", "sql", "mongo", "redis"]),
    ("Testing", &["test", "spec", "jest", "pytest"]),
    ("API", &["api", "endpoint", "route", "controller"]),
    ("UI Components", &["component", "widget", "ui", "button"]),
    ("Styling", &["css", "scss", "style", "theme"]),
    ("Build Tools", &["webpack", "babel", "gulp", "grunt"]),
    ("Deployment", &["docker", "deploy", "ci", "cd"]),
];

pub(super) fn detected_features(ctx: &TemplateContext<'_>) -> Vec<&'static str> {
    FEATURE_INDICATORS
        .iter()
        .filter(|(_, needles)| ctx.mentions_any(needles))
        .map(|(feature, _)| *feature)
        .collect()
}

pub(super) fn key_features(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Key Features & Use Cases\n")?;
    writeln!(out, "### Core Features\n")?;

    let readme_features = ctx.repo.readme.sections.iter().find(|s| {
        let title = s.title.to_lowercase();
        title.contains("feature") || title.contains("what")
    });
    match readme_features {
        Some(section) if !section.content.trim().is_empty() => {
            writeln!(out, "{}\n", section.content.trim())?;
        }
        _ => {
            let features: &[(&str, &str)] = match ctx.project_type {
                ProjectType::WebFrontend => &[
                    ("Web Interface", "Responsive layout that adapts to screen size"),
                    ("Interactive Components", "Reusable UI components with immediate feedback"),
                    ("Client-side State", "Predictable data flow between views"),
                ],
                ProjectType::WebApi => &[
                    ("HTTP Endpoints", "Resource-oriented routes for clients"),
                    ("Request Validation", "Input is checked before it reaches business logic"),
                    ("Error Handling", "Consistent error responses and logging"),
                ],
                _ => &[
                    ("Core Implementation", "The main functionality lives in a small set of modules"),
                    ("Modular Design", "Responsibilities are split across focused components"),
                    ("Extensibility", "New behaviour can be added without rewriting existing code"),
                ],
            };
            for (feature, text) in features {
                writeln!(out, "- **{feature}:** {text}")?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out, "### Use Cases\n")?;
    let cases: &[&str] = match ctx.project_type {
        ProjectType::WebFrontend => &["Public-facing web application", "Internal dashboard", "Prototype for user testing"],
        ProjectType::WebApi => &["Backend for web and mobile clients", "Integration point for third-party services", "Data processing service"],
        ProjectType::Library => &["Dependency of other projects", "Reference implementation", "Building block for tools"],
        ProjectType::MobileApp => &["Native mobile experience", "Offline-capable companion app"],
        ProjectType::DesktopApp => &["Local desktop tooling", "Offline data processing"],
        ProjectType::Generic => &["Day-to-day tooling", "Starting point for related projects", "Learning resource"],
    };
    for case in cases {
        writeln!(out, "- {case}")?;
    }

    writeln!(out, "\n### Feature Highlights\n")?;
    let detected = detected_features(ctx);
    if detected.is_empty() {
        writeln!(out, "- **Focused Scope:** The repository keeps to a single concern")?;
    } else {
        for feature in detected.iter().take(6) {
            writeln!(out, "- **{feature}:** Present in the repository layout")?;
        }
    }

    writeln!(out, "\n### Capabilities Matrix\n")?;
    writeln!(out, "| Capability | Detected |")?;
    writeln!(out, "|------------|----------|")?;
    for (feature, _) in FEATURE_INDICATORS {
        let mark = if detected.contains(feature) { "Yes" } else { "No" };
        writeln!(out, "| {feature} | {mark} |")?;
    }
    Ok(out)
}

fn language_purpose(language: &str) -> &'static str {
    match language.to_lowercase().as_str() {
        "typescript" => "Type-safe application logic and components",
        "javascript" => "Dynamic functionality and user interactions",
        "html" => "Markup structure and semantic content",
        "css" => "Styling, layout, and visual presentation",
        "scss" => "Styling with variables and mixins",
        "python" => "Backend logic and data processing",
        "java" => "Application services",
        "c++" => "Performance-critical code",
        "c#" => ".NET application development",
        "go" => "Concurrent backend services",
        "rust" => "Memory-safe systems code",
        "php" => "Server-side web development",
        "ruby" => "Web application code",
        "swift" => "iOS and macOS application development",
        "kotlin" => "Android and JVM application development",
        "shell" => "Automation scripts",
        _ => "Application code",
    }
}

/// Languages sorted by file count, largest first.
pub(super) fn ranked_languages(repo: &RepositoryModel) -> Vec<(&str, usize)> {
    let mut langs: Vec<(&str, usize)> = repo
        .languages
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    langs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    langs
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

pub(super) fn technology_stack(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Technology Stack\n")?;
    writeln!(
        out,
        "This section lists the languages, libraries and tools found in the repository.\n"
    )?;

    let langs = ranked_languages(ctx.repo);
    let total: usize = langs.iter().map(|(_, c)| c).sum();
    if !langs.is_empty() {
        writeln!(out, "### Programming Languages\n")?;
        for (lang, count) in &langs {
            let share = percentage(*count, total);
            if *lang == ctx.primary_language {
                writeln!(out, "- **{lang}** (Primary): {share:.1}% - {count} files")?;
            } else {
                writeln!(out, "- **{lang}**: {share:.1}% - {count} files")?;
            }
        }
        writeln!(out)?;
    }

    if !ctx.repo.dependencies.is_empty() {
        writeln!(out, "### Frameworks & Libraries\n")?;
        for (language, files) in &ctx.repo.dependencies {
            for (file, deps) in files {
                if deps.is_empty() {
                    continue;
                }
                let shown: Vec<String> = deps.iter().take(15).map(|d| format!("`{d}`")).collect();
                let more = deps.len().saturating_sub(15);
                write!(out, "- **{language}** ({file}): {}", shown.join(", "))?;
                if more > 0 {
                    write!(out, " and {more} more")?;
                }
                writeln!(out)?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "### Development Tools\n")?;
    let tools: &[(&str, &str)] = &[
        ("webpack", "**Webpack**: Module bundler"),
        ("vite", "**Vite**: Development server and build tool"),
        ("babel", "**Babel**: JavaScript compiler"),
        ("eslint", "**ESLint**: Linting"),
        ("prettier", "**Prettier**: Code formatting"),
        ("rustfmt", "**rustfmt**: Code formatting"),
        ("clippy", "**Clippy**: Lints"),
        ("makefile", "**Make**: Task runner"),
        ("dockerfile", "**Docker**: Container builds"),
    ];
    let mut found_tool = false;
    for (needle, line) in tools {
        if ctx.mentions(needle) {
            writeln!(out, "- {line}")?;
            found_tool = true;
        }
    }
    match ctx.ecosystem {
        Ecosystem::Node => writeln!(out, "- **npm/yarn**: Package management")?,
        Ecosystem::Python => writeln!(out, "- **pip/Poetry**: Package management and virtual environments")?,
        Ecosystem::Rust => writeln!(out, "- **Cargo**: Build system and package manager")?,
        Ecosystem::Go => writeln!(out, "- **Go modules**: Dependency management")?,
        Ecosystem::Java => writeln!(out, "- **Maven/Gradle**: Build automation")?,
        Ecosystem::Other if !found_tool => writeln!(out, "- Standard toolchain for {}", ctx.primary_language)?,
        Ecosystem::Other => {}
    }

    if !langs.is_empty() {
        writeln!(out, "\n### File Breakdown\n")?;
        writeln!(out, "| Language | Files | Percentage | Purpose |")?;
        writeln!(out, "|----------|-------|------------|---------|")?;
        for (lang, count) in &langs {
            writeln!(
                out,
                "| {lang} | {count} | {:.1}% | {} |",
                percentage(*count, total),
                language_purpose(lang)
            )?;
        }
    }

    writeln!(out, "\n### Architecture Overview\n")?;
    let notes: &[&str] = match ctx.project_type {
        ProjectType::WebFrontend => &[
            "**Component-Based Architecture**: UI split into reusable components",
            "**State Management**: Application state kept in one place",
            "**Responsive Design**: Layouts adapt to the viewport",
        ],
        ProjectType::WebApi => &[
            "**Resource-Oriented Endpoints**: Routes map to resources and HTTP methods",
            "**Layered Design**: Handlers, services and storage are kept apart",
            "**Validation**: Requests are checked at the boundary",
        ],
        _ => &[
            "**Modular Design**: Functionality is grouped by concern",
            "**Clear Entry Points**: Execution starts from a small number of files",
        ],
    };
    for note in notes {
        writeln!(out, "- {note}")?;
    }
    Ok(out)
}

pub(super) fn setup_instructions(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let name = ctx.name();
    writeln!(out, "## Setup Instructions\n")?;
    writeln!(out, "Follow these steps to install and run {name} locally.\n")?;

    writeln!(out, "### Prerequisites\n")?;
    match ctx.ecosystem {
        Ecosystem::Node => {
            writeln!(out, "- **Node.js** 18 or newer (`node --version`)")?;
            writeln!(out, "- **npm** or **yarn**")?;
        }
        Ecosystem::Python => {
            writeln!(out, "- **Python** 3.8 or newer (`python --version`)")?;
            writeln!(out, "- **pip** and a virtual environment tool (venv or conda)")?;
        }
        Ecosystem::Rust => {
            writeln!(out, "- **Rust** stable toolchain via rustup (`cargo --version`)")?;
        }
        Ecosystem::Go => {
            writeln!(out, "- **Go** 1.20 or newer (`go version`)")?;
        }
        Ecosystem::Java => {
            writeln!(out, "- **JDK** 17 or newer (`java -version`)")?;
            writeln!(out, "- **Maven** or **Gradle**")?;
        }
        Ecosystem::Other => {
            writeln!(out, "- A toolchain for {}", ctx.primary_language)?;
        }
    }
    writeln!(out, "- **Git** for version control\n")?;

    writeln!(out, "### System Requirements\n")?;
    writeln!(out, "- **Operating System**: Linux, macOS or Windows")?;
    writeln!(out, "- **Memory**: 4GB RAM minimum")?;
    writeln!(out, "- **Disk**: enough space for dependencies and build output\n")?;

    writeln!(out, "### Step-by-Step Installation\n")?;
    writeln!(out, "1. Clone the repository:\n")?;
    writeln!(out, "```bash\ngit clone <repository-url> {name}\ncd {name}\n```\n")?;
    writeln!(out, "2. Install dependencies:\n")?;
    match ctx.ecosystem {
        Ecosystem::Python => writeln!(
            out,
            "```bash\npython -m venv venv\nsource venv/bin/activate\npip install -r requirements.txt\n```\n"
        )?,
        other => writeln!(out, "```bash\n{}\n```\n", other.install_command())?,
    }
    writeln!(out, "3. Copy the environment template if the project ships one:\n")?;
    writeln!(out, "```bash\ncp .env.example .env\n```\n")?;

    writeln!(out, "### Verification\n")?;
    writeln!(out, "Run the test suite to confirm the installation works:\n")?;
    writeln!(out, "```bash\n{}\n```\n", ctx.ecosystem.test_command())?;

    writeln!(out, "### Troubleshooting Installation\n")?;
    match ctx.ecosystem {
        Ecosystem::Node => writeln!(out, "- Delete `node_modules` and rerun `npm install` when dependencies are out of sync")?,
        Ecosystem::Python => writeln!(out, "- Make sure the virtual environment is active before running `pip install`")?,
        Ecosystem::Rust => writeln!(out, "- Run `rustup update` when the toolchain is older than the crate requires")?,
        _ => writeln!(out, "- Check that the toolchain version matches the project requirements")?,
    }
    writeln!(out, "- Check network access if dependency downloads fail")?;
    Ok(out)
}

pub(super) fn configuration(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Configuration Required\n")?;
    writeln!(
        out,
        "Configuration is read from environment variables. Create a `.env` file in the project root for local development.\n"
    )?;

    writeln!(out, "### Environment Variables\n")?;
    let block = match ctx.project_type {
        ProjectType::WebFrontend => "NODE_ENV=development\nPORT=3000\nAPI_BASE_URL=http://localhost:8000/api",
        ProjectType::WebApi => "APP_ENV=development\nPORT=8000\nHOST=127.0.0.1\nDATABASE_URL=postgresql://localhost:5432/app\nSECRET_KEY=change-me",
        _ => "APP_ENV=development\nLOG_LEVEL=info",
    };
    writeln!(out, "```bash\n{block}\n```\n")?;

    writeln!(out, "### Language Configuration\n")?;
    if ctx.repo.has_language("typescript") {
        writeln!(out, "TypeScript options live in `tsconfig.json`. Keep `strict` enabled.\n")?;
    }
    match ctx.ecosystem {
        Ecosystem::Rust => writeln!(out, "Crate features and profiles are declared in `Cargo.toml`.")?,
        Ecosystem::Python => writeln!(out, "Tool settings belong in `pyproject.toml` or `setup.cfg`.")?,
        Ecosystem::Node => writeln!(out, "Scripts and engines are declared in `package.json`.")?,
        Ecosystem::Go => writeln!(out, "Module path and Go version are declared in `go.mod`.")?,
        Ecosystem::Java => writeln!(out, "Build settings are declared in `pom.xml` or `build.gradle`.")?,
        Ecosystem::Other => writeln!(out, "No language-specific configuration file was detected.")?,
    }

    writeln!(out, "\n### Build Configuration\n")?;
    if ctx.mentions("webpack") {
        writeln!(out, "- Webpack configuration controls bundling and asset handling")?;
    }
    if ctx.mentions("vite") {
        writeln!(out, "- Vite configuration controls the dev server and production build")?;
    }
    if ctx.mentions("makefile") {
        writeln!(out, "- The `Makefile` wraps common build targets")?;
    }
    if ctx.mentions("dockerfile") {
        writeln!(out, "- The `Dockerfile` defines the container image")?;
    }
    writeln!(out, "- Build with `{}`", ctx.ecosystem.install_command())?;

    if ctx.mentions_any(&["database", "db", "sql", "mongo"]) {
        writeln!(out, "\n### Database Configuration\n")?;
        writeln!(out, "1. Install the database server")?;
        writeln!(out, "2. Create a database for the application")?;
        writeln!(out, "3. Set `DATABASE_URL`")?;
        writeln!(out, "4. Run the migrations")?;
    }

    writeln!(out, "\n### Development Settings\n")?;
    writeln!(out, "| Environment | Debug | HTTPS |")?;
    writeln!(out, "|-------------|-------|-------|")?;
    writeln!(out, "| Development | On | Optional |")?;
    writeln!(out, "| Staging | Limited | Required |")?;
    writeln!(out, "| Production | Off | Required |\n")?;
    writeln!(out, "Never commit `.env` files or credentials to version control.")?;
    Ok(out)
}

pub(super) fn usage(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Usage\n")?;
    writeln!(out, "### Basic Usage\n")?;

    let commands: Vec<String> = ctx
        .repo
        .entry_points
        .iter()
        .filter_map(|entry| run_command(entry))
        .collect();
    if commands.is_empty() {
        let default = match ctx.ecosystem {
            Ecosystem::Node => "npm start",
            Ecosystem::Python => "python main.py",
            Ecosystem::Rust => "cargo run",
            Ecosystem::Go => "go run .",
            Ecosystem::Java => "mvn exec:java",
            Ecosystem::Other => "make run",
        };
        writeln!(out, "```bash\n{default}\n```\n")?;
    } else {
        writeln!(out, "```bash\n{}\n```\n", commands.join("\n"))?;
    }

    if let Some(section) = ctx.repo.readme.sections.iter().find(|s| {
        let title = s.title.to_lowercase();
        title.contains("usage") || title.contains("example")
    }) {
        writeln!(out, "### From the README\n")?;
        writeln!(out, "{}\n", truncate_chars(section.content.trim(), 1200))?;
    }

    if ctx.project_type == ProjectType::WebApi {
        writeln!(out, "### API Usage\n")?;
        writeln!(out, "```bash\ncurl -X GET http://localhost:8000/api/health\n```\n")?;
    }
    Ok(out)
}

fn run_command(entry: &str) -> Option<String> {
    let ext = entry.rsplit('.').next()?;
    let cmd = match ext {
        "py" => format!("python {entry}"),
        "js" | "mjs" => format!("node {entry}"),
        "ts" => format!("npx ts-node {entry}"),
        "java" => format!("java {}", entry.trim_end_matches(".java")),
        "go" => format!("go run {entry}"),
        "rs" => "cargo run".to_string(),
        "sh" => format!("sh {entry}"),
        _ => return None,
    };
    Some(cmd)
}

pub(super) fn api_documentation(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## API Documentation\n")?;
    writeln!(out, "### Base URL\n")?;
    writeln!(out, "```\nhttp://localhost:8000/api\n```\n")?;

    writeln!(out, "### Endpoint Sources\n")?;
    let sources: Vec<&String> = ctx
        .repo
        .files
        .iter()
        .filter(|f| {
            let f = f.to_lowercase();
            ["api/", "routes/", "controllers/", "endpoints/"]
                .iter()
                .any(|dir| f.contains(dir))
        })
        .take(10)
        .collect();
    if sources.is_empty() {
        writeln!(out, "Routes are declared alongside the application entry point.\n")?;
    } else {
        for file in sources {
            writeln!(out, "- `{file}`")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "### Response Format\n")?;
    writeln!(out, "```json\n{{\n  \"status\": \"success\",\n  \"data\": {{}}\n}}\n```\n")?;

    writeln!(out, "### Errors\n")?;
    writeln!(out, "| Status | Meaning |")?;
    writeln!(out, "|--------|---------|")?;
    writeln!(out, "| 400 | Invalid request |")?;
    writeln!(out, "| 401 | Missing or invalid credentials |")?;
    writeln!(out, "| 404 | Resource not found |")?;
    writeln!(out, "| 500 | Server error |")?;
    Ok(out)
}

pub(super) fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub(super) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
