//! Obtaining a working copy of the repository to document.
//!
//! Git sources are cloned with the `git` binary into a work directory owned by
//! the caller. Local sources are used in place.

use async_trait::async_trait;
use repo_docgen_core::contract::{FetchedSource, GitSource, RepositoryFetcher, SourceSpec};
use repo_docgen_core::DocgenError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, error, info};

/// `https://github.com/owner/repo(.git)` becomes `owner_repo`; other URLs use their last segment.
pub fn repo_name_from_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let github_path = trimmed
        .split_once("github.com/")
        .or_else(|| trimmed.split_once("github.com:"))
        .map(|(_, path)| path);
    if let Some(path) = github_path {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if parts.len() >= 2 {
            return format!("{}_{}", parts[0], parts[1]);
        }
    }

    trimmed
        .rsplit(['/', ':'])
        .find(|segment| !segment.is_empty())
        .unwrap_or("repository")
        .to_string()
}

/// Directory name of a local checkout; `.` and relative paths are resolved first.
pub fn repo_name_from_path(path: &Path) -> String {
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "repository".to_string())
}

/// Deterministic clone directory for a git source.
fn clone_dir_name(git: &GitSource) -> String {
    format!(
        "git_{}_{}",
        git.repo_url,
        git.reference.as_deref().unwrap_or("default")
    )
    .replace('/', "_")
    .replace(':', "_")
}

fn run_git(args: &[&str], cwd: Option<&Path>, repo_url: &str) -> Result<(), DocgenError> {
    let mut command = Command::new("git");
    if let Some(dir) = cwd {
        command.arg("-C").arg(dir);
    }
    command.args(args);

    match command.status() {
        Ok(s) if s.success() => {
            debug!(repo_url, args = ?args, status = ?s, "git command succeeded");
            Ok(())
        }
        Ok(s) => {
            error!(repo_url, args = ?args, "git exited with non-zero code: {}", s);
            Err(DocgenError::Fetch(format!(
                "git {} exited with {s} for {repo_url}",
                args.first().copied().unwrap_or_default()
            )))
        }
        Err(e) => {
            error!(error = ?e, repo_url, "Failed to launch git process");
            Err(DocgenError::Fetch(format!("failed to launch git: {e}")))
        }
    }
}

/// Clones git sources under `work_dir` and resolves local sources in place.
pub struct DefaultFetcher {
    work_dir: PathBuf,
}

impl DefaultFetcher {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    fn clone_git(&self, git: &GitSource) -> Result<PathBuf, DocgenError> {
        let target = self.work_dir.join(clone_dir_name(git));
        if target.exists() {
            std::fs::remove_dir_all(&target).map_err(|e| {
                error!(error = ?e, path = %target.display(), "Failed to remove existing clone dir");
                DocgenError::Io(e)
            })?;
        }
        std::fs::create_dir_all(&self.work_dir)?;

        let target_str = target.to_string_lossy().into_owned();
        let url = git.repo_url.as_str();
        match git.reference.as_deref() {
            // A shallow clone cannot check out arbitrary commits.
            Some(reference) => {
                run_git(&["clone", url, target_str.as_str()], None, url)?;
                run_git(&["checkout", reference], Some(&target), url)?;
                info!(repo_url = url, reference, path = %target.display(), "Checked out git reference");
            }
            None => {
                run_git(&["clone", "--depth", "1", url, target_str.as_str()], None, url)?;
            }
        }
        info!(repo_url = url, path = %target.display(), "Successfully cloned git repository");
        Ok(target)
    }
}

#[async_trait]
impl RepositoryFetcher for DefaultFetcher {
    async fn fetch(&self, source: &SourceSpec) -> Result<FetchedSource, DocgenError> {
        match source {
            SourceSpec::Git(git) => {
                let local_path = self.clone_git(git)?;
                Ok(FetchedSource {
                    name: repo_name_from_url(&git.repo_url),
                    local_path,
                    ephemeral: true,
                    origin: source.clone(),
                })
            }
            SourceSpec::Local(local) => {
                if !local.path.is_dir() {
                    error!(path = %local.path.display(), "Local repository path is not a directory");
                    return Err(DocgenError::Fetch(format!(
                        "local path {} does not exist or is not a directory",
                        local.path.display()
                    )));
                }
                info!(path = %local.path.display(), "Using local repository");
                Ok(FetchedSource {
                    name: repo_name_from_path(&local.path),
                    local_path: local.path.clone(),
                    ephemeral: false,
                    origin: source.clone(),
                })
            }
        }
    }
}
