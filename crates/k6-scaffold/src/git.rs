//! Git operations used by the creation pipeline
//!
//! All operations shell out to the git CLI and capture combined output for
//! diagnostic display. None of them retry.

use camino::Utf8Path;
use tracing::info;

use crate::error::Result;
use crate::exec;

/// Clone a repository with depth 1 into `dest` and strip its
/// version-control metadata, leaving a plain file tree.
///
/// # Arguments
/// * `url` - Repository URL to clone
/// * `dest` - Destination directory (must exist and be empty)
///
/// # Returns
/// Captured command output on success
pub async fn shallow_copy(url: &str, dest: &Utf8Path) -> Result<String> {
    info!("Cloning template: {}", url);

    let out = exec::run(None, "git", &["clone", "--depth", "1", url, dest.as_str()]).await?;

    tokio::fs::remove_dir_all(dest.join(".git")).await?;

    Ok(out)
}

/// Initialize a new git repository at `dir`
pub async fn init_repository(dir: &Utf8Path) -> Result<String> {
    info!("Initializing git repository at: {}", dir);

    exec::run(None, "git", &["init", dir.as_str()]).await
}

/// Register `url` as the origin remote of the repository at `dir`
pub async fn add_origin(dir: &Utf8Path, url: &str) -> Result<String> {
    info!("Adding origin remote: {}", url);

    exec::run(Some(dir), "git", &["remote", "add", "origin", url]).await
}

/// Stage all files in the repository at `dir` and commit them
pub async fn commit_all(dir: &Utf8Path, message: &str) -> Result<String> {
    info!("Committing repository at: {}", dir);

    let mut out = exec::run(Some(dir), "git", &["add", "."]).await?;
    out.push_str(&exec::run(Some(dir), "git", &["commit", "-m", message]).await?);

    Ok(out)
}
