use super::fig::lower_fig;
use super::Producer;
use crate::graph::{Rule, SynthesisSession, Target};

/// Dia drawings, exported to xfig.
pub struct DiaProducer;

impl Producer for DiaProducer {
    fn name(&self) -> &'static str {
        "dia"
    }

    fn source(&self, target: &Target, session: &SynthesisSession) -> Option<String> {
        let source = target.sibling("dia");
        session.is_available(&source).then_some(source)
    }

    fn produce(&self, target: &Target, source: &str, session: &mut SynthesisSession) {
        let fig = target.sibling("fig");
        let dia = session.config().tools.dia.clone();
        session.emit_rule(
            Rule::new(&fig)
                .with_prerequisites([source])
                .with_command(format!("{} -t fig -e {} {}", dia, fig, source)),
        );
        session.add_clean(&fig);
        lower_fig(session, &fig, &target.name, None);
    }
}
