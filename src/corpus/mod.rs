//! The corpus directory: top-level documents and hand-authored rules.

use crate::error::{Diagnostic, SetupError};
use crate::fs::FileSystem;
use crate::source::scanner::strip_comment_lines;
use crate::source::{Directives, DocumentClass};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What lives at the top of the corpus directory.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// `.tex` files that declare a document class and are not `%%ignore`d.
    pub documents: Vec<String>,
    /// `*.mk` files, sorted by name.
    pub rule_files: Vec<PathBuf>,
    /// Concatenated text of `rule_files`.
    pub handwritten_rules: String,
    /// Top-level files that could not be read. They contribute nothing.
    pub diagnostics: Vec<Diagnostic>,
}

impl Corpus {
    pub fn discover(fs: &dyn FileSystem, root: &Path) -> Result<Self> {
        if !fs.is_dir(root) {
            return Err(SetupError::MissingCorpus(root.to_path_buf()).into());
        }

        let mut entries = fs
            .read_dir(root)
            .with_context(|| format!("Failed to list corpus {}", root.display()))?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut corpus = Corpus::default();
        for entry in entries.iter().filter(|e| e.is_file()) {
            let name = entry.file_name();
            if !name.ends_with(".mk") && !name.ends_with(".tex") {
                continue;
            }
            let text = match fs.read_to_string(entry.path()) {
                Ok(text) => text,
                Err(e) => {
                    debug!(file = %name, "Skipping unreadable corpus file");
                    corpus.diagnostics.push(Diagnostic::Unreadable {
                        path: name.to_string(),
                        reason: format!("{:#}", e),
                    });
                    continue;
                }
            };

            if name.ends_with(".mk") {
                corpus.handwritten_rules.push_str(&text);
                if !text.ends_with('\n') {
                    corpus.handwritten_rules.push('\n');
                }
                corpus.rule_files.push(entry.path().to_path_buf());
            } else {
                if !DocumentClass::is_declared_in(&strip_comment_lines(&text)) {
                    continue;
                }
                if Directives::parse(&text).is_ignored() {
                    debug!(document = %name, "Skipping ignored document");
                    continue;
                }
                corpus.documents.push(name.to_string());
            }
        }

        info!(
            documents = corpus.documents.len(),
            rule_files = corpus.rule_files.len(),
            "Discovered corpus at {}",
            root.display()
        );
        Ok(corpus)
    }
}
