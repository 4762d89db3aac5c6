//! Hand-off to the external build executor.

use crate::error::SetupError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// The generated rule file. It is deleted on drop unless [`RuleFile::persist`]
/// was called.
#[derive(Debug)]
pub struct RuleFile {
    path: PathBuf,
    keep: bool,
}

impl RuleFile {
    /// Writes `contents` to `texmk-<pid>.mk` inside `dir`.
    pub fn create(dir: &Path, contents: &str) -> Result<Self, SetupError> {
        let path = dir.join(format!("texmk-{}.mk", std::process::id()));
        fs::write(&path, contents).map_err(|source| SetupError::RuleDestination {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = contents.len(), "Wrote rule file");
        Ok(Self { path, keep: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keeps the file on disk and returns its path.
    pub fn persist(mut self) -> PathBuf {
        self.keep = true;
        self.path.clone()
    }
}

impl Drop for RuleFile {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to remove rule file");
        }
    }
}

/// Runs the configured make command against a rule file.
#[derive(Debug, Clone)]
pub struct MakeExecutor {
    command: String,
    working_dir: PathBuf,
}

impl MakeExecutor {
    pub fn new(command: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Returns the executor's exit status. A run killed by a signal counts
    /// as status 1.
    pub fn run(&self, rules: &Path, targets: &[String]) -> Result<i32> {
        let mut words = self.command.split_whitespace();
        let program = words.next().context("Executor command is empty")?;

        info!(
            "Running {} -f {} {}",
            self.command,
            rules.display(),
            targets.join(" ")
        );
        let status = Command::new(program)
            .args(words)
            .arg("-f")
            .arg(rules)
            .args(targets)
            .current_dir(&self.working_dir)
            .status()
            .with_context(|| format!("Failed to start executor '{}'", self.command))?;

        Ok(status.code().unwrap_or(1))
    }
}
