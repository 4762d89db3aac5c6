//! Dependency discovery for TeX documents and style files.
//!
//! The extractor matches each construct category in a fixed order against a
//! scratch copy of the comment-stripped source, removing what it matched so
//! later categories never see the same text twice. Directive-driven additions
//! come from the comment-preserving view. `%%nodepend` removals run after
//! every addition, wherever the directive sits in the file.

mod dependency;

pub use dependency::{Dependency, DependencyList, DependencyOrigin};

use crate::error::Diagnostic;
use crate::graph::SynthesisSession;
use crate::source::{with_default_extension, Directives, NESTED_DOCUMENT_PATTERN};
use regex::Regex;
use tracing::debug;

pub struct DependencyExtractor {
    graphics: [Regex; 3],
    listing: Regex,
    nested: Regex,
    legacy_figure: Regex,
    bibliography_style: Regex,
    package: Regex,
    bibliography: Regex,
}

impl Default for DependencyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyExtractor {
    pub fn new() -> Self {
        let re = |pattern: &str| Regex::new(pattern).expect("valid regex");
        Self {
            graphics: [
                re(r"\\includegraphics\*?(?:\s*\[[^\]]*\])*\s*\{([^}]*)\}"),
                re(r"\\(?:epsfig|psfig)\s*\{[^}]*?\b(?:file|figure)\s*=\s*([^,}\s]+)[^}]*\}"),
                re(r"\\epsf(?:box|file)\s*(?:\[[^\]]*\])?\s*\{([^}]*)\}"),
            ],
            listing: re(r"\\(?:verbatiminput|lstinputlisting)\*?\s*(?:\[[^\]]*\])?\s*\{([^}]*)\}"),
            nested: re(NESTED_DOCUMENT_PATTERN),
            legacy_figure: re(r#"\\special\s*\{\s*psfile\s*=\s*"?([^\s}"]+)"?[^}]*\}"#),
            bibliography_style: re(r"\\bibliographystyle\s*\{([^}]*)\}"),
            package: re(r"\\usepackage\s*(?:\[[^\]]*\])?\s*\{([^}]*)\}"),
            bibliography: re(r"\\bibliography\s*\{([^}]*)\}"),
        }
    }

    /// Collects the dependencies of `document`, enqueueing every newly
    /// discovered build target on `session`. Never fails: unreadable files
    /// contribute nothing.
    pub fn extract(&self, session: &mut SynthesisSession, document: &str) -> DependencyList {
        let mut stack = Vec::new();
        self.extract_nested(session, document, &mut stack)
    }

    fn extract_nested(
        &self,
        session: &mut SynthesisSession,
        document: &str,
        stack: &mut Vec<String>,
    ) -> DependencyList {
        if stack.iter().any(|d| d == document) {
            let mut chain = stack.clone();
            chain.push(document.to_string());
            session.report(Diagnostic::IncludeCycle {
                document: document.to_string(),
                chain,
            });
            return DependencyList::default();
        }
        stack.push(document.to_string());

        let mut scratch = session.read_stripped(document);
        let directives = session.directives(document);
        let graphic_ext = session.config().default_graphic_ext.clone();
        let mut deps = DependencyList::default();

        for re in &self.graphics {
            for picture in take_matches(re, &mut scratch) {
                if picture.contains('#') || picture.contains('\\') {
                    continue;
                }
                let name = with_default_extension(&picture, &graphic_ext);
                session.enqueue(&name);
                deps.push(name, DependencyOrigin::Graphic);
            }
        }

        for listing in take_matches(&self.listing, &mut scratch) {
            deps.push(listing, DependencyOrigin::Listing);
        }

        for nested in take_matches(&self.nested, &mut scratch) {
            let nested = with_default_extension(&nested, "tex");
            deps.push(nested.clone(), DependencyOrigin::NestedDocument);
            let nested_deps = self.extract_nested(session, &nested, stack);
            deps.extend(nested_deps);
            session.enqueue(&nested);
        }

        for figure in take_matches(&self.legacy_figure, &mut scratch) {
            session.enqueue(&figure);
            deps.push(figure, DependencyOrigin::LegacyFigure);
        }

        for style in take_matches(&self.bibliography_style, &mut scratch) {
            let bst = with_default_extension(&style, "bst");
            if session.is_available(&bst) {
                session.enqueue(&bst);
                deps.push(bst, DependencyOrigin::BibliographyStyle);
            }
        }

        for name in directives.depends() {
            session.enqueue(name);
            deps.push(name, DependencyOrigin::DeclaredDepend);
        }

        for package in directives.packages() {
            let sty = with_default_extension(package, "sty");
            session.enqueue(&sty);
            deps.push(sty, DependencyOrigin::DeclaredPackage);
        }

        for list in take_matches(&self.package, &mut scratch) {
            for package in split_list(&list) {
                let sty = with_default_extension(package, "sty");
                if session.is_available(&sty) {
                    session.enqueue(&sty);
                    deps.push(sty, DependencyOrigin::Package);
                }
            }
        }

        for list in take_matches(&self.bibliography, &mut scratch) {
            for database in split_list(&list) {
                deps.push(
                    with_default_extension(database, "bib"),
                    DependencyOrigin::BibliographyDatabase,
                );
            }
        }

        apply_nodepends(&directives, &mut deps, document);

        stack.pop();
        debug!(document = %document, dependencies = deps.len(), "Extracted dependencies");
        deps
    }
}

fn apply_nodepends(directives: &Directives, deps: &mut DependencyList, document: &str) {
    for pattern in directives.nodepends() {
        let removed = deps.remove_matching(pattern);
        debug!(document = %document, pattern = %pattern, removed, "Applied nodepend");
    }
}

/// Returns the trimmed first capture of every match and removes the matches
/// from `scratch`.
fn take_matches(re: &Regex, scratch: &mut String) -> Vec<String> {
    let found: Vec<String> = re
        .captures_iter(scratch.as_str())
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|name| !name.is_empty())
        .collect();

    if !found.is_empty() {
        *scratch = re.replace_all(scratch.as_str(), "").into_owned();
    }
    found
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}
