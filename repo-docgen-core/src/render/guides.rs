//! Templates for structure, workflow and maintenance sections.

use super::templates::{detected_features, Ecosystem, TemplateContext};
use crate::model::{NodeKind, TreeNode};
use crate::project_type::ProjectType;
use std::fmt::{self, Write};

fn directory_purpose(name: &str) -> &'static str {
    match name.to_lowercase().as_str() {
        "src" | "lib" | "app" => "Application source code",
        "tests" | "test" | "spec" | "__tests__" => "Automated tests",
        "docs" | "doc" | "documentation" => "Project documentation",
        "scripts" | "bin" | "tools" => "Helper scripts and tooling",
        "config" | "configs" | "settings" => "Configuration files",
        "api" | "routes" | "controllers" | "endpoints" => "HTTP endpoints and request handling",
        "models" | "schemas" | "entities" => "Data models",
        "components" | "widgets" | "ui" => "User interface components",
        "public" | "static" | "assets" | "images" => "Static assets",
        "migrations" | "db" | "database" => "Database schema and migrations",
        "examples" | "demos" | "samples" => "Example programs",
        "crates" | "packages" | "modules" => "Workspace members",
        ".github" | ".gitlab" | "ci" => "Continuous integration configuration",
        _ => "Project files",
    }
}

/// Renders a tree with box-drawing connectors.
pub(crate) fn format_tree(node: &TreeNode) -> String {
    let mut out = String::new();
    out.push_str(&node.name);
    if node.kind == NodeKind::Directory {
        out.push('/');
    }
    out.push('\n');
    format_children(&node.children, "", &mut out);
    out
}

fn format_children(children: &[TreeNode], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let connector = if last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&child.name);
        if child.kind == NodeKind::Directory {
            out.push('/');
        }
        out.push('\n');
        let next = format!("{prefix}{}", if last { "    " } else { "│   " });
        format_children(&child.children, &next, out);
    }
}

pub(super) fn project_structure(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let structure = &ctx.repo.structure;
    writeln!(out, "## Project Structure\n")?;

    writeln!(out, "### Directory Tree\n")?;
    match &structure.tree {
        Some(tree) => writeln!(out, "```\n{}```\n", format_tree(tree))?,
        None => {
            let mut lines = vec![format!("{}/", ctx.name())];
            for dir in &structure.directories {
                lines.push(format!("├── {dir}/"));
            }
            for file in &structure.root_files {
                lines.push(format!("├── {file}"));
            }
            writeln!(out, "```\n{}\n```\n", lines.join("\n"))?;
        }
    }

    if !structure.directories.is_empty() {
        writeln!(out, "### Directory Descriptions\n")?;
        for dir in &structure.directories {
            writeln!(out, "- `{dir}/`: {}", directory_purpose(dir))?;
        }
        writeln!(out)?;
    }

    let key_files: Vec<&String> = structure
        .root_files
        .iter()
        .filter(|f| {
            ctx.repo.config_files.contains(f)
                || ctx.repo.entry_points.contains(f)
                || f.to_lowercase().starts_with("readme")
                || ctx.repo.license.as_ref() == Some(*f)
        })
        .collect();
    if !key_files.is_empty() {
        writeln!(out, "### Key Files\n")?;
        for file in key_files {
            writeln!(out, "- `{file}`")?;
        }
        writeln!(out)?;
    }

    let assets: Vec<&String> = structure
        .directories
        .iter()
        .filter(|d| directory_purpose(d) == "Static assets")
        .collect();
    if !assets.is_empty() {
        writeln!(out, "### Asset Organization\n")?;
        for dir in assets {
            writeln!(out, "- Static files are served from `{dir}/`")?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "The repository contains {} files in {} directories, nested at most {} levels deep.",
        ctx.repo.total_files(),
        ctx.repo.statistics.total_directories,
        structure.max_depth
    )?;
    Ok(out)
}

pub(super) fn components(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Major Components & Modules\n")?;
    writeln!(out, "### Core Application Components\n")?;

    let dirs = &ctx.repo.structure.directories;
    if dirs.is_empty() {
        writeln!(out, "All code lives at the repository root.\n")?;
    } else {
        writeln!(out, "| Component | Files | Responsibility |")?;
        writeln!(out, "|-----------|-------|----------------|")?;
        for dir in dirs {
            let prefix = format!("{dir}/");
            let files = ctx.repo.files.iter().filter(|f| f.starts_with(&prefix)).count();
            writeln!(out, "| `{dir}` | {files} | {} |", directory_purpose(dir))?;
        }
        writeln!(out)?;
    }

    if !ctx.repo.entry_points.is_empty() {
        writeln!(out, "Execution starts in:\n")?;
        for entry in &ctx.repo.entry_points {
            writeln!(out, "- `{entry}`")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "### Data Management\n")?;
    if ctx.mentions_any(&["database", "models", "schema", "migrations", "sql", "mongo", "redis"]) {
        writeln!(out, "Persistent data is handled by the model and migration files in the repository.\n")?;
    } else {
        writeln!(out, "No dedicated persistence layer was found.\n")?;
    }

    writeln!(out, "### Architecture Patterns\n")?;
    let pattern = match ctx.project_type {
        ProjectType::WebFrontend => "Component tree with unidirectional data flow",
        ProjectType::WebApi => "Request handlers delegating to service and storage layers",
        ProjectType::Library => "Public API surface over internal modules",
        ProjectType::MobileApp => "Screens composed from shared components",
        ProjectType::DesktopApp => "Event loop driving application state",
        ProjectType::Generic => "Modules grouped by responsibility",
    };
    writeln!(out, "- {pattern}\n")?;

    writeln!(out, "### Module Dependencies\n")?;
    let count = ctx.repo.dependency_names().len();
    if count == 0 {
        writeln!(out, "No external dependencies are declared.")?;
    } else {
        writeln!(out, "The project declares {count} external dependencies across {} ecosystems.", ctx.repo.dependencies.len())?;
    }
    Ok(out)
}

pub(super) fn execution_plan(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Execution Plan\n")?;
    writeln!(out, "### Development Workflow\n")?;
    writeln!(out, "1. Create a branch for the change")?;
    writeln!(out, "2. Implement and test locally")?;
    writeln!(out, "3. Open a pull request for review\n")?;

    writeln!(out, "### Build Process\n")?;
    writeln!(out, "```bash\n{}\n```\n", ctx.ecosystem.install_command())?;

    writeln!(out, "### Testing Strategy\n")?;
    writeln!(out, "Run `{}` before every push.\n", ctx.ecosystem.test_command())?;

    writeln!(out, "### Deployment Pipeline\n")?;
    if ctx.repo.ci_cd.is_empty() {
        writeln!(out, "No CI configuration was found; deployments are manual.")?;
    } else {
        for file in &ctx.repo.ci_cd {
            writeln!(out, "- Pipeline defined in `{file}`")?;
        }
    }
    Ok(out)
}

pub(super) fn development_workflow(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Development Workflow\n")?;

    writeln!(out, "### Development Environment\n")?;
    writeln!(out, "1. Follow the setup instructions")?;
    writeln!(out, "2. Install development dependencies")?;
    writeln!(out, "3. Configure your editor for {}\n", ctx.primary_language)?;

    writeln!(out, "### Code Standards\n")?;
    let standards: &[&str] = match ctx.ecosystem {
        Ecosystem::Rust => &["Format with `cargo fmt`", "Lint with `cargo clippy`"],
        Ecosystem::Python => &["Format with `black`", "Lint with `flake8` or `ruff`"],
        Ecosystem::Node => &["Format with Prettier", "Lint with ESLint"],
        Ecosystem::Go => &["Format with `gofmt`", "Vet with `go vet`"],
        Ecosystem::Java => &["Follow the project's checkstyle rules"],
        Ecosystem::Other => &["Match the style of surrounding code"],
    };
    for standard in standards {
        writeln!(out, "- {standard}")?;
    }

    writeln!(out, "\n### Git Workflow\n")?;
    writeln!(out, "- Branch from `main` using descriptive branch names")?;
    writeln!(out, "- Keep commits focused and write imperative commit messages")?;
    writeln!(out, "- Rebase on `main` before opening a pull request\n")?;

    if ctx.repo.config_files.iter().any(|f| f == "Makefile") {
        writeln!(out, "### Build Commands\n")?;
        writeln!(out, "```bash\nmake build\nmake test\nmake clean\n```\n")?;
    }

    writeln!(out, "### Review Process\n")?;
    writeln!(out, "Every change is reviewed by at least one maintainer before merging.")?;
    Ok(out)
}

fn framework_command(framework: &str) -> Option<&'static str> {
    match framework.to_lowercase().as_str() {
        "pytest" => Some("pytest"),
        "unittest" => Some("python -m unittest"),
        "jest" => Some("npm test"),
        "mocha" => Some("npx mocha"),
        "vitest" => Some("npx vitest"),
        "cargo" | "cargo test" => Some("cargo test"),
        "go test" => Some("go test ./..."),
        "junit" => Some("mvn test"),
        _ => None,
    }
}

pub(super) fn testing_strategy(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let tests = &ctx.repo.tests;
    writeln!(out, "## Testing Strategy\n")?;

    writeln!(out, "### Testing Framework\n")?;
    if tests.frameworks.is_empty() {
        writeln!(out, "No test framework was detected.\n")?;
    } else {
        for framework in &tests.frameworks {
            writeln!(out, "- {framework}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "### Test Types\n")?;
    writeln!(out, "- **Unit tests** cover individual functions and modules")?;
    writeln!(out, "- **Integration tests** exercise components together")?;
    if ctx.project_type.is_web() {
        writeln!(out, "- **End-to-end tests** drive the application through its public interface")?;
    }

    writeln!(out, "\n### Running Tests\n")?;
    let command = tests
        .frameworks
        .iter()
        .find_map(|f| framework_command(f))
        .unwrap_or_else(|| ctx.ecosystem.test_command());
    writeln!(out, "```bash\n{command}\n```\n")?;

    if tests.directories.is_empty() && tests.files.is_empty() {
        writeln!(out, "No tests were found in the repository. Adding tests is the first step toward reliable releases.\n")?;
    } else {
        for dir in &tests.directories {
            writeln!(out, "- `{dir}`: test files")?;
        }
        writeln!(out, "- {} test files in total\n", tests.files.len())?;
    }

    writeln!(out, "### Coverage Reports\n")?;
    let target = match ctx.complexity {
        crate::project_type::Complexity::Low => 70,
        crate::project_type::Complexity::Medium => 80,
        crate::project_type::Complexity::High => 90,
    };
    writeln!(out, "Aim for at least {target}% line coverage.\n")?;

    writeln!(out, "### CI/CD Integration\n")?;
    if ctx.repo.ci_cd.is_empty() {
        writeln!(out, "Add a CI workflow that runs the test command on every pull request.")?;
    } else {
        writeln!(out, "Tests run in CI via {}.", ctx.repo.ci_cd.join(", "))?;
    }
    Ok(out)
}

pub(super) fn deployment_checklist(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Deployment Checklist\n")?;

    writeln!(out, "### Pre-deployment Checks\n")?;
    writeln!(out, "- [ ] All tests pass")?;
    writeln!(out, "- [ ] Version number and changelog updated")?;
    writeln!(out, "- [ ] Configuration reviewed for the target environment")?;
    writeln!(out, "- [ ] Secrets are provided by the environment\n")?;

    writeln!(out, "### Deployment Steps\n")?;
    if ctx.mentions("dockerfile") || ctx.repo.config_files.iter().any(|f| f.to_lowercase().contains("docker")) {
        let tag = ctx.name().to_lowercase().replace(' ', "-");
        writeln!(out, "```bash\ndocker build -t {tag} .\ndocker run -p 8000:8000 {tag}\n```\n")?;
    } else {
        writeln!(out, "1. Build a release artifact")?;
        writeln!(out, "2. Copy it to the target host")?;
        writeln!(out, "3. Restart the service\n")?;
    }

    writeln!(out, "### Environment Configuration\n")?;
    writeln!(out, "Set the variables listed under Configuration Required for each environment.\n")?;

    writeln!(out, "### Monitoring Setup\n")?;
    writeln!(out, "- Collect application logs")?;
    writeln!(out, "- Alert on error rates and failed health checks\n")?;

    writeln!(out, "### Rollback Procedures\n")?;
    writeln!(out, "Keep the previous release artifact available and redeploy it if verification fails.")?;
    Ok(out)
}

pub(super) fn troubleshooting(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Troubleshooting & Tips\n")?;

    writeln!(out, "### Common Issues\n")?;
    let issues: &[(&str, &str)] = match ctx.ecosystem {
        Ecosystem::Node => &[
            ("Module not found", "Run `npm install` again and check the Node.js version"),
            ("Port already in use", "Stop the other process or change `PORT`"),
        ],
        Ecosystem::Python => &[
            ("ImportError", "Activate the virtual environment and reinstall requirements"),
            ("Version conflicts", "Recreate the virtual environment from scratch"),
        ],
        Ecosystem::Rust => &[
            ("Build fails after update", "Run `cargo clean` and rebuild"),
            ("Toolchain too old", "Run `rustup update stable`"),
        ],
        _ => &[
            ("Build fails", "Check the toolchain version against the prerequisites"),
            ("Missing configuration", "Compare your `.env` with the Configuration Required section"),
        ],
    };
    for (issue, fix) in issues {
        writeln!(out, "- **{issue}:** {fix}")?;
    }

    writeln!(out, "\n### Development Tips\n")?;
    writeln!(out, "- Run the tests before every commit")?;
    writeln!(out, "- Keep dependencies up to date\n")?;

    writeln!(out, "### Debugging Guide\n")?;
    writeln!(out, "1. Reproduce the problem with the smallest possible input")?;
    writeln!(out, "2. Raise the log level")?;
    writeln!(out, "3. Add a failing test before fixing the bug\n")?;

    writeln!(out, "### FAQ\n")?;
    writeln!(out, "**Where do I ask for help?** Open an issue in the repository tracker.")?;
    Ok(out)
}

pub(super) fn performance(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Performance Optimization\n")?;

    writeln!(out, "### Optimization Strategies\n")?;
    let strategies: &[&str] = match ctx.project_type {
        ProjectType::WebFrontend => &["Split bundles and lazy-load routes", "Compress and cache static assets"],
        ProjectType::WebApi => &["Add indexes for frequent queries", "Paginate large responses", "Pool database connections"],
        _ => &["Profile before optimizing", "Avoid repeated work in hot loops"],
    };
    for strategy in strategies {
        writeln!(out, "- {strategy}")?;
    }

    writeln!(out, "\n### Monitoring Tools\n")?;
    writeln!(out, "Track latency, throughput and memory usage in every environment.\n")?;

    writeln!(out, "### Benchmarking\n")?;
    let bench = match ctx.ecosystem {
        Ecosystem::Rust => "cargo bench",
        Ecosystem::Go => "go test -bench=.",
        Ecosystem::Python => "python -m timeit",
        _ => "a repeatable load test",
    };
    writeln!(out, "Measure changes with `{bench}` and compare against the main branch.\n")?;

    writeln!(out, "### Caching Strategies\n")?;
    if detected_features(ctx).contains(&"Database") {
        writeln!(out, "Cache expensive queries close to the data access layer.\n")?;
    } else {
        writeln!(out, "Cache results of expensive pure computations.\n")?;
    }

    writeln!(out, "### Resource Management\n")?;
    writeln!(out, "Release file handles and connections promptly and bound in-memory buffers.")?;
    Ok(out)
}

pub(super) fn contributing(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## Contributing Guidelines\n")?;

    writeln!(out, "### Getting Started\n")?;
    writeln!(out, "1. Fork the repository")?;
    writeln!(out, "2. Create a feature branch")?;
    writeln!(out, "3. Make your changes with tests")?;
    writeln!(out, "4. Run `{}`", ctx.ecosystem.test_command())?;
    writeln!(out, "5. Open a pull request\n")?;

    writeln!(out, "### Code Standards\n")?;
    writeln!(out, "Follow the conventions described under Development Workflow.\n")?;

    writeln!(out, "### Pull Request Process\n")?;
    writeln!(out, "- Describe what changed and why")?;
    writeln!(out, "- Link related issues")?;
    writeln!(out, "- Keep pull requests small enough to review in one sitting\n")?;

    writeln!(out, "### Issue Reporting\n")?;
    writeln!(out, "Include steps to reproduce, expected behaviour and actual behaviour.\n")?;

    writeln!(out, "### Community Guidelines\n")?;
    writeln!(out, "Be respectful and constructive in reviews and discussions.")?;
    Ok(out)
}

pub(super) fn license(ctx: &TemplateContext<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "## License\n")?;
    match &ctx.repo.license {
        Some(file) => writeln!(
            out,
            "This project is licensed under the terms specified in the `{file}` file."
        )?,
        None => writeln!(
            out,
            "License information not found. Add a LICENSE file to specify the terms of use."
        )?,
    }
    Ok(out)
}
