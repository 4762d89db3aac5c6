use super::{with_default_extension, NESTED_DOCUMENT_PATTERN};
use crate::error::{Diagnostic, Diagnostics};
use crate::fs::FileSystem;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::trace;

/// Reads sources relative to the corpus root. Every file is read at most
/// once per run; unreadable files read as empty and are reported once.
pub struct SourceScanner {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    cache: HashMap<String, Option<Arc<str>>>,
    include_re: Regex,
}

impl SourceScanner {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
            cache: HashMap::new(),
            include_re: Regex::new(NESTED_DOCUMENT_PATTERN).expect("valid regex"),
        }
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.fs.is_file(&self.path_of(name))
    }

    /// Full content, comments included.
    pub fn read_raw(&mut self, name: &str, diagnostics: &mut Diagnostics) -> Arc<str> {
        if let Some(cached) = self.cache.get(name) {
            return cached.clone().unwrap_or_else(|| Arc::from(""));
        }

        let path = self.path_of(name);
        let content = match self.fs.read_to_string(&path) {
            Ok(content) => {
                trace!(file = %name, bytes = content.len(), "Read source");
                Some(Arc::from(content))
            }
            Err(e) => {
                diagnostics.report(Diagnostic::Unreadable {
                    path: name.to_string(),
                    reason: format!("{:#}", e),
                });
                None
            }
        };

        self.cache.insert(name.to_string(), content.clone());
        content.unwrap_or_else(|| Arc::from(""))
    }

    /// Content without whole-line comments. Comments trailing real content
    /// are kept.
    pub fn read_stripped(&mut self, name: &str, diagnostics: &mut Diagnostics) -> String {
        strip_comment_lines(&self.read_raw(name, diagnostics))
    }

    /// Stripped content with every `\input`/`\include` replaced by the
    /// expanded content of the referenced file. A file already being
    /// expanded expands to nothing and the cycle is reported.
    pub fn read_expanded(&mut self, name: &str, diagnostics: &mut Diagnostics) -> String {
        let mut stack = Vec::new();
        self.expand(name, &mut stack, diagnostics)
    }

    fn expand(&mut self, name: &str, stack: &mut Vec<String>, diagnostics: &mut Diagnostics) -> String {
        if stack.iter().any(|s| s == name) {
            let mut chain = stack.clone();
            chain.push(name.to_string());
            diagnostics.report(Diagnostic::IncludeCycle {
                document: name.to_string(),
                chain,
            });
            return String::new();
        }

        let stripped = self.read_stripped(name, diagnostics);
        stack.push(name.to_string());

        let mut expanded = String::with_capacity(stripped.len());
        let mut last = 0;
        let includes: Vec<(usize, usize, String)> = self
            .include_re
            .captures_iter(&stripped)
            .filter_map(|cap| {
                let whole = cap.get(0)?;
                let target = cap.get(1)?.as_str().trim();
                Some((whole.start(), whole.end(), with_default_extension(target, "tex")))
            })
            .collect();

        for (start, end, nested) in includes {
            expanded.push_str(&stripped[last..start]);
            expanded.push_str(&self.expand(&nested, stack, diagnostics));
            last = end;
        }
        expanded.push_str(&stripped[last..]);

        stack.pop();
        expanded
    }
}

/// Drops lines whose first non-blank character is `%`.
pub fn strip_comment_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('%'))
        .fold(String::with_capacity(content.len()), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn scanner(fs: MockFileSystem) -> SourceScanner {
        SourceScanner::new(Arc::new(fs), "/mock")
    }

    #[test]
    fn test_read_raw_missing_file_is_soft() {
        let mut scanner = scanner(MockFileSystem::new());
        let mut diagnostics = Diagnostics::default();

        assert_eq!(&*scanner.read_raw("missing.tex", &mut diagnostics), "");
        assert_eq!(&*scanner.read_raw("missing.tex", &mut diagnostics), "");
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics.iter().next(),
            Some(Diagnostic::Unreadable { path, .. }) if path == "missing.tex"
        ));
    }

    #[test]
    fn test_read_stripped_keeps_trailing_comments() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "paper.tex",
            "% header comment\n   % indented comment\nText % trailing\n\\input{a}\n",
        );
        let mut scanner = scanner(fs);
        let mut diagnostics = Diagnostics::default();

        assert_eq!(
            scanner.read_stripped("paper.tex", &mut diagnostics),
            "Text % trailing\n\\input{a}\n"
        );
    }

    #[test]
    fn test_read_expanded_inlines_nested_documents() {
        let fs = MockFileSystem::new();
        fs.add_file("paper.tex", "begin\n\\input{chapters/intro}\nend\n");
        fs.add_file("chapters/intro.tex", "% hidden\nintro \\include{chapters/detail.tex}\n");
        fs.add_file("chapters/detail.tex", "detail\n");
        let mut scanner = scanner(fs);
        let mut diagnostics = Diagnostics::default();

        let expanded = scanner.read_expanded("paper.tex", &mut diagnostics);
        assert_eq!(expanded, "begin\nintro detail\n\n\nend\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_read_expanded_allows_space_before_brace() {
        let fs = MockFileSystem::new();
        fs.add_file("main.tex", "\\input {preamble}\nbody\n");
        fs.add_file("preamble.tex", "\\documentclass[landscape]{article}\n");
        let mut scanner = scanner(fs);
        let mut diagnostics = Diagnostics::default();

        let expanded = scanner.read_expanded("main.tex", &mut diagnostics);
        assert_eq!(expanded, "\\documentclass[landscape]{article}\n\nbody\n");
    }

    #[test]
    fn test_read_expanded_terminates_on_cycles() {
        let fs = MockFileSystem::new();
        fs.add_file("a.tex", "A \\input{b}\n");
        fs.add_file("b.tex", "B \\input{a}\n");
        let mut scanner = scanner(fs);
        let mut diagnostics = Diagnostics::default();

        let expanded = scanner.read_expanded("a.tex", &mut diagnostics);
        assert_eq!(expanded, "A B \n\n");
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics.iter().next(),
            Some(Diagnostic::IncludeCycle { document, .. }) if document == "a.tex"
        ));
    }

    #[test]
    fn test_reads_are_memoized() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("paper.tex", "first");
        let mut scanner = SourceScanner::new(fs.clone(), "/mock");
        let mut diagnostics = Diagnostics::default();

        assert_eq!(&*scanner.read_raw("paper.tex", &mut diagnostics), "first");
        fs.add_file("paper.tex", "second");
        assert_eq!(&*scanner.read_raw("paper.tex", &mut diagnostics), "first");
    }
}
