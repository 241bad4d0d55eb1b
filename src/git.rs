//! Working-tree checks via the `git` CLI.

use crate::error::{Result, SiteOpsError};
use tokio::process::Command;

/// Fail unless the working tree has no unstaged changes. Editing the site
/// document on a dirty tree would silently mix new entries into uncommitted
/// work.
pub async fn ensure_clean() -> Result<()> {
    let output = Command::new("git")
        .args(["diff", "--exit-code"])
        .output()
        .await
        .map_err(|e| SiteOpsError::LocalState {
            message: format!("could not run git: {e}"),
        })?;

    if !output.status.success() {
        return Err(SiteOpsError::LocalState {
            message: "working tree is not clean; commit or stash your changes first".to_string(),
        });
    }
    Ok(())
}

/// Unstaged changes as a unified diff; empty when the tree is clean.
pub async fn diff() -> Result<String> {
    let output = Command::new("git")
        .args(["diff"])
        .output()
        .await
        .map_err(|e| SiteOpsError::LocalState {
            message: format!("could not run git: {e}"),
        })?;

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
