use super::fig::lower_fig;
use super::Producer;
use crate::graph::{Rule, SynthesisSession, Target};

/// Graphviz graphs. `%%viafig` routes the export through xfig, which
/// renders labels with real fonts; `%%dotopts` adds command-line options.
pub struct DotProducer;

impl Producer for DotProducer {
    fn name(&self) -> &'static str {
        "dot"
    }

    fn source(&self, target: &Target, session: &SynthesisSession) -> Option<String> {
        let source = target.sibling("dot");
        session.is_available(&source).then_some(source)
    }

    fn produce(&self, target: &Target, source: &str, session: &mut SynthesisSession) {
        let directives = session.directives(source);
        let options = directives
            .dot_opts()
            .map(|opts| format!(" {}", opts))
            .unwrap_or_default();
        let dot = session.config().tools.dot.clone();

        if directives.via_fig() {
            let fig = target.sibling("fig");
            session.emit_rule(
                Rule::new(&fig)
                    .with_prerequisites([source])
                    .with_command(format!("{} -Tfig{} {} -o {}", dot, options, source, fig)),
            );
            session.add_clean(&fig);
            lower_fig(session, &fig, &target.name, None);
        } else {
            session.emit_rule(
                Rule::new(&target.name)
                    .with_prerequisites([source])
                    .with_command(format!("{} -Teps{} {} -o {}", dot, options, source, target.name)),
            );
            session.add_clean(&target.name);
        }
    }
}
