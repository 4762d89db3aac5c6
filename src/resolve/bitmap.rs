use crate::graph::{Rule, SynthesisSession, Target};

/// `root.png` is rendered from `root.eps`. A png that is already available
/// is a source, not a product.
pub fn resolve(target: &Target, session: &mut SynthesisSession) {
    if session.is_available(&target.name) {
        return;
    }

    let eps = target.sibling("eps");
    session.enqueue(&eps);
    let convert = session.config().tools.convert.clone();
    session.emit_rule(
        Rule::new(&target.name)
            .with_prerequisites([eps.as_str()])
            .with_command(format!("{} {} {}", convert, eps, target.name)),
    );
    session.add_clean(&target.name);
}
