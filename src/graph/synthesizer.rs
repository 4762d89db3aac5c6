use super::{ArtifactKind, SynthesisSession, Target};
use crate::error::Diagnostic;
use crate::extract::DependencyExtractor;
use crate::producers::ProducerTable;
use crate::resolve::{bitmap, document, style};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Counters for one completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisSummary {
    pub resolved: usize,
    pub rules: usize,
    pub diagnostics: usize,
    #[serde(skip)]
    pub duration: Duration,
}

/// Drains the session's worklist, resolving one target per iteration until
/// nothing new is discovered.
pub struct BuildGraphSynthesizer {
    extractor: DependencyExtractor,
    producers: ProducerTable,
}

impl Default for BuildGraphSynthesizer {
    fn default() -> Self {
        Self::new(ProducerTable::with_defaults())
    }
}

impl BuildGraphSynthesizer {
    pub fn new(producers: ProducerTable) -> Self {
        Self {
            extractor: DependencyExtractor::new(),
            producers,
        }
    }

    pub fn run(&self, session: &mut SynthesisSession) -> SynthesisSummary {
        let start = Instant::now();
        let first = session.resolutions();

        while let Some(name) = session.worklist.pop() {
            self.resolve(&Target::parse(&name), session);
            session.count_resolution();
        }

        let summary = SynthesisSummary {
            resolved: session.resolutions() - first,
            rules: session.rules().len(),
            diagnostics: session.diagnostics().len(),
            duration: start.elapsed(),
        };
        info!(
            resolved = summary.resolved,
            rules = summary.rules,
            diagnostics = summary.diagnostics,
            "Synthesis complete in {:.2?}",
            summary.duration
        );
        summary
    }

    /// Dispatches `target` to the resolver for its kind.
    pub fn resolve(&self, target: &Target, session: &mut SynthesisSession) {
        debug!(target_name = %target, kind = ?target.kind, "Resolving");
        match &target.kind {
            kind if kind.is_document_output() => document::resolve(target, &self.extractor, session),
            ArtifactKind::Style => style::resolve(target, &self.extractor, session),
            ArtifactKind::VectorImage => {
                if self.producers.resolve(target, session).is_none() {
                    session.report(Diagnostic::UnresolvedTarget {
                        target: target.name.clone(),
                    });
                }
            }
            ArtifactKind::Bitmap => bitmap::resolve(target, session),
            _ => {
                if !session.is_available(&target.name) {
                    session.report(Diagnostic::Unbuildable {
                        target: target.name.clone(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TexmkConfig;
    use crate::fs::{FileSystem, MockFileSystem};
    use crate::source::CorpusOracle;
    use std::sync::Arc;

    fn session_with(fs: MockFileSystem, rules: &str) -> SynthesisSession {
        let fs: Arc<dyn FileSystem> = Arc::new(fs);
        let config = Arc::new(TexmkConfig::builtin("/mock"));
        let oracle = Box::new(CorpusOracle::new(fs.clone(), "/mock", rules.to_string()));
        SynthesisSession::new(config, fs, oracle)
    }

    #[test]
    fn test_closure_over_discovered_targets() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "paper.tex",
            "\\documentclass{article}\n\\includegraphics{arch}\n\\includegraphics{logo.png}\n",
        );
        fs.add_file("arch.dot", "digraph { a -> b }\n");
        let mut session = session_with(fs, "logo.png: logo.svg\n");
        session.add_document("paper.tex");

        let summary = BuildGraphSynthesizer::default().run(&mut session);

        for target in ["paper.pdf", "paper.dvi", "arch.eps"] {
            assert!(session.rules().contains(target), "missing rule for {}", target);
        }
        assert!(!session.rules().contains("logo.png"));
        assert!(session.diagnostics().is_empty());
        assert_eq!(summary.resolved, session.worklist().visited());
        assert_eq!(summary.rules, session.rules().len());
    }

    #[test]
    fn test_missing_image_is_diagnosed() {
        let fs = MockFileSystem::new();
        fs.add_file("paper.tex", "\\documentclass{article}\n\\includegraphics{ghost}\n");
        let mut session = session_with(fs, "");
        session.add_document("paper.tex");

        BuildGraphSynthesizer::default().run(&mut session);

        let diagnostics = session.diagnostics().iter().cloned().collect::<Vec<_>>();
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnresolvedTarget {
                target: "ghost.eps".to_string()
            }]
        );
        assert!(session.rules().contains("paper.dvi"));
    }

    #[test]
    fn test_unknown_kinds() {
        let fs = MockFileSystem::new();
        fs.add_file("notes.txt", "");
        let mut session = session_with(fs, "");
        session.enqueue("notes.txt");
        session.enqueue("results.csv");

        BuildGraphSynthesizer::default().run(&mut session);

        assert!(session.rules().is_empty());
        assert_eq!(session.diagnostics().len(), 1);
        assert_eq!(
            session.diagnostics().iter().next().map(|d| d.to_string()),
            Some("Don't know how to build results.csv".to_string())
        );
    }

    #[test]
    fn test_bitmap_from_vector() {
        let fs = MockFileSystem::new();
        fs.add_file("chart.fig", "#FIG 3.2\n");
        let mut session = session_with(fs, "");
        session.enqueue("chart.png");

        BuildGraphSynthesizer::default().run(&mut session);

        let png = session.rules().get("chart.png").unwrap();
        assert_eq!(png.prerequisites, vec!["chart.eps"]);
        assert_eq!(png.recipe, vec!["convert chart.eps chart.png"]);
        assert_eq!(
            session.rules().get("chart.eps").unwrap().recipe,
            vec!["fig2dev -L eps chart.fig chart.eps"]
        );
    }

    #[test]
    fn test_style_touch_rule() {
        let fs = MockFileSystem::new();
        fs.add_file("house.sty", "\\usepackage{colors}\n%%depend logo.eps\n");
        fs.add_file("colors.sty", "");
        fs.add_file("logo.eps", "");
        fs.add_file("plain.sty", "\\newcommand{\\x}{y}\n");
        let mut session = session_with(fs, "");
        session.enqueue("house.sty");
        session.enqueue("plain.sty");

        BuildGraphSynthesizer::default().run(&mut session);

        let house = session.rules().get("house.sty").unwrap();
        assert_eq!(house.prerequisites, vec!["logo.eps", "colors.sty"]);
        assert_eq!(house.recipe, vec!["touch house.sty"]);
        assert!(!session.rules().contains("plain.sty"));
        assert!(!session.rules().contains("colors.sty"));
    }
}
