use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

/// Paths to stage and the commit message describing them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncRequest {
    /// Working directory the `git` commands run in.
    pub workdir: PathBuf,
    /// Paths relative to `workdir`.
    pub paths: Vec<PathBuf>,
    /// Commit message.
    pub message: String,
}

impl SyncRequest {
    /// Request for `paths` inside `workdir`.
    pub fn new(workdir: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            workdir: workdir.into(),
            paths: Vec::new(),
            message: message.into(),
        }
    }

    /// Add one path to stage.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }
}

/// Result of a sync attempt; failures are reported, never raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Add, commit and push all succeeded.
    Synced,
    /// A step failed; the reason is logged.
    Failed(String),
}

impl SyncOutcome {
    /// True when every step succeeded.
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced)
    }
}

fn git(workdir: &Path, args: &[&str]) -> Result<(), String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .output()
        .map_err(|err| format!("could not run git {}: {err}", args.first().copied().unwrap_or("")))?;
    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!(
            "git {} exited with {}: {}",
            args.first().copied().unwrap_or(""),
            output.status,
            stderr.trim()
        ))
    }
}

fn run_sync(request: &SyncRequest) -> Result<(), String> {
    if request.paths.is_empty() {
        return Err("nothing to stage".to_string());
    }
    let paths: Vec<String> = request
        .paths
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    let mut add = vec!["add", "--"];
    add.extend(paths.iter().map(String::as_str));
    git(&request.workdir, &add)?;
    git(&request.workdir, &["commit", "-m", &request.message])?;
    git(&request.workdir, &["push"])
}

/// Stage, commit and push the requested paths.
///
/// Any failing step stops the sequence and is logged at `warn`.
pub fn sync_outputs(request: &SyncRequest) -> SyncOutcome {
    match run_sync(request) {
        Ok(()) => {
            info!("[sicas:sync] pushed '{}'", request.message);
            SyncOutcome::Synced
        }
        Err(reason) => {
            warn!("[sicas:sync] sync skipped: {reason}");
            SyncOutcome::Failed(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_request_fails_without_running_git() {
        let dir = tempdir().unwrap();
        let outcome = sync_outputs(&SyncRequest::new(dir.path(), "msg"));
        assert_eq!(outcome, SyncOutcome::Failed("nothing to stage".to_string()));
    }

    #[test]
    fn sync_outside_a_repository_is_not_fatal() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("report.md"), "x").unwrap();
        let request = SyncRequest::new(dir.path(), "msg").with_path("report.md");
        assert!(!sync_outputs(&request).is_synced());
    }
}
