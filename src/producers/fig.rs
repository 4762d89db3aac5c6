use super::Producer;
use crate::graph::{Rule, SynthesisSession, Target};
use regex::Regex;

/// Emits the fig2dev rule lowering `fig` to `eps`, optionally restricted to
/// a depth range such as `1:3`.
pub(crate) fn lower_fig(session: &mut SynthesisSession, fig: &str, eps: &str, depths: Option<&str>) {
    let fig2dev = session.config().tools.fig2dev.clone();
    let command = match depths {
        Some(range) => format!("{} -L eps -D +{} {} {}", fig2dev, range, fig, eps),
        None => format!("{} -L eps {} {}", fig2dev, fig, eps),
    };
    session.emit_rule(Rule::new(eps).with_prerequisites([fig]).with_command(command));
    session.add_clean(eps);
}

/// A whole xfig drawing.
pub struct FigProducer;

impl Producer for FigProducer {
    fn name(&self) -> &'static str {
        "fig"
    }

    fn source(&self, target: &Target, session: &SynthesisSession) -> Option<String> {
        let source = target.sibling("fig");
        session.is_available(&source).then_some(source)
    }

    fn produce(&self, target: &Target, source: &str, session: &mut SynthesisSession) {
        lower_fig(session, source, &target.name, None);
    }
}

/// Selected depths of an xfig drawing: `arch-depth1_3.eps` comes from
/// `arch.fig` restricted to depths 1 through 3.
pub struct FigDepthProducer;

impl FigDepthProducer {
    /// Splits `arch-depth1_3` into (`arch`, `1:3`).
    pub fn parse_root(root: &str) -> Option<(String, String)> {
        let re = Regex::new(r"^(.+)-depth(\d+)_(\d+)$").expect("valid regex");
        let cap = re.captures(root)?;
        Some((
            cap[1].to_string(),
            format!("{}:{}", &cap[2], &cap[3]),
        ))
    }
}

impl Producer for FigDepthProducer {
    fn name(&self) -> &'static str {
        "fig-depth"
    }

    fn source(&self, target: &Target, session: &SynthesisSession) -> Option<String> {
        let (base, _) = Self::parse_root(&target.root)?;
        let source = format!("{}.fig", base);
        session.is_available(&source).then_some(source)
    }

    fn produce(&self, target: &Target, source: &str, session: &mut SynthesisSession) {
        if let Some((_, range)) = Self::parse_root(&target.root) {
            lower_fig(session, source, &target.name, Some(&range));
        }
    }
}
