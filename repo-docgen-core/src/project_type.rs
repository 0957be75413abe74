//! Keyword heuristics that classify a repository.
//!
//! These are plain substring checks over the file listing and dependency names.
//! The first matching category in declaration order wins.

use crate::model::RepositoryModel;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    WebFrontend,
    WebApi,
    MobileApp,
    DesktopApp,
    Library,
    Generic,
}

const FRONTEND_INDICATORS: &[&str] = &[
    "package.json",
    "index.html",
    "src/App.js",
    "src/App.tsx",
    "webpack.config.js",
];
const API_INDICATORS: &[&str] = &[
    "app.py",
    "main.py",
    "server.js",
    "index.js",
    "requirements.txt",
    "api/",
];
const MOBILE_INDICATORS: &[&str] = &["android/", "ios/", "App.js", "react-native"];
const DESKTOP_INDICATORS: &[&str] = &[".exe", ".app", "main.cpp", "main.c"];
const LIBRARY_INDICATORS: &[&str] = &["setup.py", "__init__.py", "lib/", "src/lib"];

impl ProjectType {
    pub fn detect(repo: &RepositoryModel) -> Self {
        let listing = repo.file_listing();
        let deps = repo.dependency_names().join("\n").to_lowercase();
        let any_of = |indicators: &[&str]| indicators.iter().any(|i| listing.contains(i));

        let scripted = repo.has_language("javascript") || repo.has_language("typescript");
        if scripted && (any_of(FRONTEND_INDICATORS) || deps.contains("react")) {
            return ProjectType::WebFrontend;
        }
        if any_of(API_INDICATORS) {
            return ProjectType::WebApi;
        }
        if any_of(MOBILE_INDICATORS) || deps.contains("react-native") {
            return ProjectType::MobileApp;
        }
        if any_of(DESKTOP_INDICATORS) {
            return ProjectType::DesktopApp;
        }
        if any_of(LIBRARY_INDICATORS) {
            return ProjectType::Library;
        }
        ProjectType::Generic
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::WebFrontend => "web_frontend",
            ProjectType::WebApi => "web_api",
            ProjectType::MobileApp => "mobile_app",
            ProjectType::DesktopApp => "desktop_app",
            ProjectType::Library => "library",
            ProjectType::Generic => "generic",
        }
    }

    /// "web_api" becomes "Web Api".
    pub fn title(&self) -> String {
        title_case(self.as_str())
    }

    pub fn is_web(&self) -> bool {
        matches!(self, ProjectType::WebFrontend | ProjectType::WebApi)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complexity used by the section templates and the test generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

const COMPLEX_INDICATORS: &[&str] = &[
    "docker",
    "kubernetes",
    "microservice",
    "api",
    "database",
    "redis",
    "mongodb",
];

impl Complexity {
    pub fn assess(repo: &RepositoryModel) -> Self {
        let files = repo.total_files();
        let languages = repo.languages.len();
        let mut score = 0;

        score += match files {
            n if n > 100 => 3,
            n if n > 50 => 2,
            n if n > 20 => 1,
            _ => 0,
        };
        score += match languages {
            n if n > 5 => 2,
            n if n > 3 => 1,
            _ => 0,
        };
        let listing = repo.file_listing().to_lowercase();
        if COMPLEX_INDICATORS.iter().any(|i| listing.contains(i)) {
            score += 2;
        }

        match score {
            s if s >= 5 => Complexity::High,
            s if s >= 3 => Complexity::Medium,
            _ => Complexity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

/// Coarser size classification recorded in outline metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineComplexity {
    Simple,
    Medium,
    Complex,
}

impl OutlineComplexity {
    pub fn assess(repo: &RepositoryModel) -> Self {
        let total = repo.total_files();
        let code = repo.statistics.code_files;
        if total < 10 && code < 5 {
            OutlineComplexity::Simple
        } else if total < 50 && code < 20 {
            OutlineComplexity::Medium
        } else {
            OutlineComplexity::Complex
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutlineComplexity::Simple => "simple",
            OutlineComplexity::Medium => "medium",
            OutlineComplexity::Complex => "complex",
        }
    }
}

const WEB_FRAMEWORKS: &[(&str, &[&str])] = &[
    ("python", &["flask", "django", "fastapi", "tornado", "pyramid"]),
    ("javascript", &["express", "koa", "hapi", "nestjs", "fastify"]),
    ("node", &["express", "koa", "hapi", "nestjs", "fastify"]),
    ("java", &["spring", "jersey", "dropwizard"]),
    ("go", &["gin", "echo", "fiber", "gorilla"]),
    ("rust", &["actix", "warp", "rocket", "axum"]),
];
const API_DIRECTORIES: &[&str] = &["api", "routes", "controllers", "endpoints"];

/// True when a web framework is declared or the top level has an API-style directory.
pub fn is_api_project(repo: &RepositoryModel) -> bool {
    let framework_declared = WEB_FRAMEWORKS.iter().any(|(lang, frameworks)| {
        repo.dependencies_for(lang).iter().any(|dep| {
            let dep = dep.to_lowercase();
            frameworks.iter().any(|f| dep.contains(f))
        })
    });
    framework_declared
        || repo
            .structure
            .directories
            .iter()
            .any(|d| API_DIRECTORIES.contains(&d.as_str()))
}

pub(crate) fn title_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
