use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Non-fatal problems found during synthesis. Each is recorded once on the
/// session and logged; none of them stops the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("Cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("No producer can make {target}")]
    UnresolvedTarget { target: String },

    #[error("Don't know how to build {target}")]
    Unbuildable { target: String },

    #[error("{document} includes itself via {}", .chain.join(" -> "))]
    IncludeCycle { document: String, chain: Vec<String> },
}

/// Ordered, de-duplicated collection of diagnostics for one run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Records `diagnostic` unless an identical one was already reported.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if self.entries.contains(&diagnostic) {
            return;
        }
        warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// Failures that abort a run before the executor is started.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Cannot create rule file {path:?}: {source}")]
    RuleDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corpus directory {0:?} does not exist or is not a directory")]
    MissingCorpus(PathBuf),
}
