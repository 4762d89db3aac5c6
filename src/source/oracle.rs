use crate::fs::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;

/// Answers "is this file present, or will someone else build it?".
pub trait AvailabilityOracle: Send + Sync {
    fn is_available(&self, name: &str) -> bool;
}

/// Existence on disk, or a plain substring hit in the hand-authored rule
/// text. The substring test is approximate: `fig.eps` is "declared" by any
/// rule file that merely mentions `bigfig.eps`.
pub struct CorpusOracle {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    handwritten_rules: String,
}

impl CorpusOracle {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>, handwritten_rules: String) -> Self {
        Self {
            fs,
            root: root.into(),
            handwritten_rules,
        }
    }

    /// A regular file under the corpus root. Directories do not count.
    pub fn exists(&self, name: &str) -> bool {
        !name.is_empty() && self.fs.is_file(&self.root.join(name))
    }

    pub fn is_declared(&self, name: &str) -> bool {
        !name.is_empty() && self.handwritten_rules.contains(name)
    }
}

impl AvailabilityOracle for CorpusOracle {
    fn is_available(&self, name: &str) -> bool {
        self.exists(name) || self.is_declared(name)
    }
}
