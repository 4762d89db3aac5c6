use super::fig::lower_fig;
use super::Producer;
use crate::graph::{Rule, SynthesisSession, Target};

/// `.tree` diagrams, exported to xfig by tree2fig.
pub struct TreeProducer;

impl Producer for TreeProducer {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn source(&self, target: &Target, session: &SynthesisSession) -> Option<String> {
        let source = target.sibling("tree");
        session.is_available(&source).then_some(source)
    }

    fn produce(&self, target: &Target, source: &str, session: &mut SynthesisSession) {
        let fig = target.sibling("fig");
        let tree2fig = session.config().tools.tree2fig.clone();
        session.emit_rule(
            Rule::new(&fig)
                .with_prerequisites([source])
                .with_command(format!("{} < {} > {}", tree2fig, source, fig)),
        );
        session.add_clean(&fig);
        lower_fig(session, &fig, &target.name, None);
    }
}
