//! The compiled-document chain: `.tex` to `.dvi`, then `.ps`, `.pdf`, or
//! `.ps.gz`.

use super::AUXILIARY_EXTENSIONS;
use crate::error::Diagnostic;
use crate::extract::{DependencyExtractor, DependencyOrigin};
use crate::graph::{ArtifactKind, Rule, SynthesisSession, Target};
use crate::source::DocumentClass;
use regex::Regex;

/// Extra LaTeX passes allowed while the log still asks for a rerun.
const RERUN_PASSES: &str = "1 2 3";

/// `paper-2up.ps` and friends, built by the `paper-%up.ps` pattern rule.
fn nup_base(target: &Target) -> Option<String> {
    if target.kind != ArtifactKind::Ps {
        return None;
    }
    let re = Regex::new(r"^(.+)-[0-9]+up$").expect("valid regex");
    re.captures(&target.root).map(|cap| cap[1].to_string())
}

/// Emits the rule for one document output. Outputs with no `.tex` source
/// are left alone when they are available, and reported otherwise.
pub fn resolve(target: &Target, extractor: &DependencyExtractor, session: &mut SynthesisSession) {
    let source = target.sibling("tex");
    if !session.is_available(&source) {
        if let Some(base) = nup_base(target) {
            if session.is_available(&format!("{}.tex", base)) {
                session.enqueue(&format!("{}.ps", base));
                return;
            }
        }
        if !session.is_available(&target.name) {
            session.report(Diagnostic::Unbuildable {
                target: target.name.clone(),
            });
        }
        return;
    }

    match target.kind {
        ArtifactKind::Dvi => dvi(target, &source, extractor, session),
        ArtifactKind::Ps => postscript(target, &source, session),
        ArtifactKind::Pdf => pdf(target, &source, session),
        ArtifactKind::PsGz => compressed_postscript(target, session),
        _ => {}
    }
}

fn dvi(target: &Target, source: &str, extractor: &DependencyExtractor, session: &mut SynthesisSession) {
    let deps = extractor.extract(session, source);
    let options = session
        .directives(source)
        .latex_opts()
        .map(|opts| format!(" {}", opts))
        .unwrap_or_default();

    let tools = &session.config().tools;
    let latex = format!("{} -interaction=nonstopmode{} {}", tools.latex, options, source);
    let mut rule = Rule::new(&target.name)
        .with_prerequisites([source])
        .with_prerequisites(deps.names())
        .with_command(latex.clone());

    if deps.has_origin(DependencyOrigin::BibliographyDatabase) {
        rule = rule
            .with_command(format!("{} {}", tools.bibtex, target.root))
            .with_command(latex.clone());
    }
    rule = rule.with_command(format!(
        "for pass in {}; do grep -qs 'Rerun to get' {}.log || break; {}; done",
        RERUN_PASSES, target.root, latex
    ));

    session.emit_rule(rule);
    session.record_document_dependencies(source, deps);
    session.add_clean(&target.name);
    for ext in AUXILIARY_EXTENSIONS {
        session.add_clean(target.sibling(ext));
    }
}

/// dvips flags for `source`: a `%%dvipsflags` line wins, otherwise the page
/// size and orientation follow the document class.
fn dvips_flags(source: &str, session: &mut SynthesisSession) -> String {
    if let Some(flags) = session.directives(source).dvips_flags() {
        return format!(" {}", flags);
    }

    let class = DocumentClass::parse(&session.read_expanded(source));
    let mut flags = String::new();
    if !class.as_ref().is_some_and(DocumentClass::sets_own_page_size) {
        flags.push_str(&format!(" -t {}", session.config().paper));
    }
    if class.as_ref().is_some_and(DocumentClass::is_landscape) {
        flags.push_str(" -t landscape");
    }
    flags
}

fn dvips_command(target: &Target, source: &str, session: &mut SynthesisSession) -> String {
    let flags = dvips_flags(source, session);
    format!(
        "{}{} -o {} {}",
        session.config().tools.dvips,
        flags,
        target.sibling("ps"),
        target.sibling("dvi")
    )
}

fn postscript(target: &Target, source: &str, session: &mut SynthesisSession) {
    let dvi = target.sibling("dvi");
    session.enqueue(&dvi);
    let dvips = dvips_command(target, source, session);
    session.emit_rule(
        Rule::new(&target.name)
            .with_prerequisites([dvi.as_str()])
            .with_command(dvips),
    );

    // `make paper-2up.ps` prints two pages per sheet.
    let psnup = session.config().tools.psnup.clone();
    session.emit_rule(
        Rule::new(format!("{}-%up.ps", target.root))
            .with_prerequisites([target.name.as_str()])
            .with_command(format!("{} -$* {} $@", psnup, target.name)),
    );
    session.add_bare(&target.name);
    session.add_bare(format!("{}-*up.ps", target.root));
}

fn pdf(target: &Target, source: &str, session: &mut SynthesisSession) {
    let dvi = target.sibling("dvi");
    let ps = target.sibling("ps");
    session.enqueue(&dvi);

    let dvips = dvips_command(target, source, session);
    let mut rule = Rule::new(&target.name)
        .with_prerequisites([dvi.as_str()])
        .with_command(dvips)
        .with_command(format!(
            "{} {} {}",
            session.config().tools.ps2pdf,
            ps,
            target.name
        ));
    if !session.is_requested(&ps) {
        rule = rule.with_command(format!("rm -f {}", ps));
    }

    session.emit_rule(rule);
    session.add_bare(&target.name);
}

fn compressed_postscript(target: &Target, session: &mut SynthesisSession) {
    let ps = target.sibling("ps");
    session.enqueue(&ps);
    let gzip = session.config().tools.gzip.clone();
    session.emit_rule(
        Rule::new(&target.name)
            .with_prerequisites([ps.as_str()])
            .with_command(format!("{} -c {} > {}", gzip, ps, target.name)),
    );
    session.add_bare(&target.name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TexmkConfig;
    use crate::fs::{FileSystem, MockFileSystem};
    use crate::source::CorpusOracle;
    use std::sync::Arc;

    fn session_with(fs: MockFileSystem) -> SynthesisSession {
        let fs: Arc<dyn FileSystem> = Arc::new(fs);
        let config = Arc::new(TexmkConfig {
            paper: "a4".to_string(),
            ..TexmkConfig::builtin("/mock")
        });
        let oracle = Box::new(CorpusOracle::new(fs.clone(), "/mock", String::new()));
        SynthesisSession::new(config, fs, oracle)
    }

    fn resolve_one(session: &mut SynthesisSession, name: &str) {
        resolve(&Target::parse(name), &DependencyExtractor::new(), session);
    }

    #[test]
    fn test_dvi_rule_with_bibliography() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "paper.tex",
            "%%latexopts -halt-on-error\n\\documentclass{article}\n\\bibliography{refs}\n",
        );
        let mut session = session_with(fs);
        resolve_one(&mut session, "paper.dvi");

        let rule = session.rules().get("paper.dvi").unwrap();
        assert_eq!(rule.prerequisites, vec!["paper.tex", "refs.bib"]);
        assert_eq!(rule.recipe[0], "latex -interaction=nonstopmode -halt-on-error paper.tex");
        assert_eq!(rule.recipe[1], "bibtex paper");
        assert_eq!(
            rule.recipe[3],
            "for pass in 1 2 3; do grep -qs 'Rerun to get' paper.log || break; \
             latex -interaction=nonstopmode -halt-on-error paper.tex; done"
        );
        assert!(session.trash().clean().contains("paper.aux"));
        assert!(session.trash().clean().contains("paper.dvi"));
        assert!(session.document_dependencies("paper.tex").is_some());
    }

    #[test]
    fn test_dvi_rule_without_bibliography() {
        let fs = MockFileSystem::new();
        fs.add_file("note.tex", "\\documentclass{article}\n");
        let mut session = session_with(fs);
        resolve_one(&mut session, "note.dvi");

        let rule = session.rules().get("note.dvi").unwrap();
        assert_eq!(rule.recipe.len(), 2);
        assert!(!rule.recipe.iter().any(|c| c.starts_with("bibtex")));
    }

    #[test]
    fn test_postscript_landscape_and_nup() {
        let fs = MockFileSystem::new();
        fs.add_file("talk.tex", "\\documentclass{seminar}\n");
        let mut session = session_with(fs);
        resolve_one(&mut session, "talk.ps");

        let rule = session.rules().get("talk.ps").unwrap();
        assert_eq!(rule.prerequisites, vec!["talk.dvi"]);
        assert_eq!(rule.recipe, vec!["dvips -t a4 -t landscape -o talk.ps talk.dvi"]);

        let nup = session.rules().get("talk-%up.ps").unwrap();
        assert_eq!(nup.recipe, vec!["psnup -$* talk.ps $@"]);
        assert!(session.worklist().is_visited("talk.dvi"));
        assert!(session.trash().bare().contains("talk-*up.ps"));
    }

    #[test]
    fn test_nup_target_resolves_through_pattern_rule() {
        let fs = MockFileSystem::new();
        fs.add_file("talk.tex", "\\documentclass{article}\n");
        let mut session = session_with(fs);
        resolve_one(&mut session, "talk-2up.ps");

        assert!(session.diagnostics().is_empty());
        assert!(session.worklist().is_visited("talk.ps"));
        assert!(session.rules().get("talk-2up.ps").is_none());
    }

    #[test]
    fn test_nup_target_without_document_is_reported() {
        let mut session = session_with(MockFileSystem::new());
        resolve_one(&mut session, "ghost-2up.ps");

        assert_eq!(session.diagnostics().len(), 1);
    }

    #[test]
    fn test_own_page_size_class_gets_no_paper_flag() {
        let fs = MockFileSystem::new();
        fs.add_file("deck.tex", "\\documentclass[pdf]{prosper}\n");
        let mut session = session_with(fs);
        resolve_one(&mut session, "deck.ps");

        let rule = session.rules().get("deck.ps").unwrap();
        assert_eq!(rule.recipe, vec!["dvips -t landscape -o deck.ps deck.dvi"]);
    }

    #[test]
    fn test_dvipsflags_directive_overrides_class() {
        let fs = MockFileSystem::new();
        fs.add_file("talk.tex", "%%DVIPSFLAGS -Ppdf -G0\n\\documentclass{seminar}\n");
        let mut session = session_with(fs);
        resolve_one(&mut session, "talk.ps");

        let rule = session.rules().get("talk.ps").unwrap();
        assert_eq!(rule.recipe, vec!["dvips -Ppdf -G0 -o talk.ps talk.dvi"]);
    }

    #[test]
    fn test_class_found_through_input() {
        let fs = MockFileSystem::new();
        fs.add_file("main.tex", "\\input{preamble}\n\\begin{document}\n");
        fs.add_file("preamble.tex", "\\documentclass[landscape]{article}\n");
        let mut session = session_with(fs);
        resolve_one(&mut session, "main.ps");

        let rule = session.rules().get("main.ps").unwrap();
        assert_eq!(rule.recipe, vec!["dvips -t a4 -t landscape -o main.ps main.dvi"]);
    }

    #[test]
    fn test_pdf_removes_unrequested_postscript() {
        let fs = MockFileSystem::new();
        fs.add_file("paper.tex", "\\documentclass{article}\n");
        let mut session = session_with(fs);
        resolve_one(&mut session, "paper.pdf");

        let rule = session.rules().get("paper.pdf").unwrap();
        assert_eq!(rule.prerequisites, vec!["paper.dvi"]);
        assert_eq!(
            rule.recipe,
            vec![
                "dvips -t a4 -o paper.ps paper.dvi",
                "ps2pdf paper.ps paper.pdf",
                "rm -f paper.ps",
            ]
        );
    }

    #[test]
    fn test_pdf_keeps_requested_postscript() {
        let fs = MockFileSystem::new();
        fs.add_file("paper.tex", "\\documentclass{article}\n");
        let mut session = session_with(fs);
        session.request("paper.ps");
        resolve_one(&mut session, "paper.pdf");

        let rule = session.rules().get("paper.pdf").unwrap();
        assert_eq!(rule.recipe.len(), 2);
    }

    #[test]
    fn test_compressed_postscript() {
        let fs = MockFileSystem::new();
        fs.add_file("paper.tex", "\\documentclass{article}\n");
        let mut session = session_with(fs);
        resolve_one(&mut session, "paper.ps.gz");

        let rule = session.rules().get("paper.ps.gz").unwrap();
        assert_eq!(rule.prerequisites, vec!["paper.ps"]);
        assert_eq!(rule.recipe, vec!["gzip -c paper.ps > paper.ps.gz"]);
        assert!(session.worklist().is_visited("paper.ps"));
    }

    #[test]
    fn test_missing_source_is_reported() {
        let mut session = session_with(MockFileSystem::new());
        resolve_one(&mut session, "ghost.pdf");

        assert!(session.rules().is_empty());
        assert_eq!(
            session.diagnostics().iter().next(),
            Some(&Diagnostic::Unbuildable {
                target: "ghost.pdf".to_string()
            })
        );
    }

    #[test]
    fn test_existing_output_without_source_is_silent() {
        let fs = MockFileSystem::new();
        fs.add_file("scan.pdf", "%PDF");
        let mut session = session_with(fs);
        resolve_one(&mut session, "scan.pdf");

        assert!(session.rules().is_empty());
        assert!(session.diagnostics().is_empty());
    }
}
