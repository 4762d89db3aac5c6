use crate::error::Diagnostic;
use crate::extract::DependencyExtractor;
use crate::graph::{Rule, SynthesisSession, Target};

/// Style files are scanned like documents. When they depend on anything, a
/// `touch` rule orders them after their dependencies; the recipe makes
/// nothing new.
pub fn resolve(target: &Target, extractor: &DependencyExtractor, session: &mut SynthesisSession) {
    if !session.exists(&target.name) {
        if !session.is_available(&target.name) {
            session.report(Diagnostic::Unbuildable {
                target: target.name.clone(),
            });
        }
        return;
    }

    let deps = extractor.extract(session, &target.name);
    if deps.is_empty() {
        return;
    }

    session.emit_rule(
        Rule::new(&target.name)
            .with_prerequisites(deps.names())
            .with_command(format!("touch {}", target.name)),
    );
}
