use super::fig::lower_fig;
use super::Producer;
use crate::graph::{Rule, SynthesisSession, Target};
use regex::Regex;

/// Gnuplot scripts, rendered with the fig terminal. Quoted `*.dat` names in
/// the script are data files the plot depends on.
pub struct GnuplotProducer;

impl GnuplotProducer {
    pub fn data_files(script: &str) -> Vec<String> {
        let re = Regex::new(r#"["']([^"'\n]+\.dat)["']"#).expect("valid regex");
        let mut files: Vec<String> = Vec::new();
        for cap in re.captures_iter(script) {
            let name = cap[1].trim().to_string();
            if !files.contains(&name) {
                files.push(name);
            }
        }
        files
    }
}

impl Producer for GnuplotProducer {
    fn name(&self) -> &'static str {
        "gnuplot"
    }

    fn source(&self, target: &Target, session: &SynthesisSession) -> Option<String> {
        let source = target.sibling("gpi");
        session.is_available(&source).then_some(source)
    }

    fn produce(&self, target: &Target, source: &str, session: &mut SynthesisSession) {
        let fig = target.sibling("fig");
        let data = Self::data_files(&session.read_raw(source));
        for file in &data {
            session.enqueue(file);
        }

        let gnuplot = session.config().tools.gnuplot.clone();
        session.emit_rule(
            Rule::new(&fig)
                .with_prerequisites([source])
                .with_prerequisites(data)
                .with_command(format!(
                    "{} -e \"set terminal fig color; set output '{}'\" {}",
                    gnuplot, fig, source
                )),
        );
        session.add_clean(&fig);
        lower_fig(session, &fig, &target.name, None);
    }
}
