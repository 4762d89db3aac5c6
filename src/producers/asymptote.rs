use super::Producer;
use crate::graph::{Rule, SynthesisSession, Target};
use crate::source::with_default_extension;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Asymptote sources. Modules pulled in with `import`, `access`, `include`
/// or `from` become dependencies when they resolve to a file in the
/// source's own directory or on `ASYMPTOTE_DIR`; everything else is
/// assumed to be a system module.
pub struct AsymptoteProducer;

impl AsymptoteProducer {
    fn module_names(source: &str) -> Vec<String> {
        let re = Regex::new(
            r#"(?m)^[ \t]*(?:import|access|include|from)[ \t]+(?:"([^"]+)"|([A-Za-z_][\w./-]*))"#,
        )
        .expect("valid regex");

        re.captures_iter(source)
            .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn source_dir(source: &str) -> String {
        Path::new(source)
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ".".to_string())
    }

    fn resolve_module(session: &SynthesisSession, module: &str, dirs: &[PathBuf]) -> Option<String> {
        let file = with_default_extension(module, "asy");
        dirs.iter()
            .map(|dir| {
                if dir == Path::new(".") {
                    file.clone()
                } else {
                    dir.join(&file).to_string_lossy().to_string()
                }
            })
            .find(|candidate| session.exists(candidate))
    }

    /// Local modules reachable from `source`, depth first, each listed once.
    pub fn local_modules(session: &mut SynthesisSession, source: &str) -> Vec<String> {
        let mut dirs = vec![PathBuf::from(Self::source_dir(source))];
        dirs.extend(session.config().asymptote_search_path());

        let mut found = Vec::new();
        let mut pending = vec![source.to_string()];
        while let Some(file) = pending.pop() {
            let content = session.read_raw(&file);
            for module in Self::module_names(&content) {
                match Self::resolve_module(session, &module, &dirs) {
                    Some(path) if path != source && !found.contains(&path) => {
                        found.push(path.clone());
                        pending.push(path);
                    }
                    Some(_) => {}
                    None => trace!(module = %module, "Skipping non-local Asymptote module"),
                }
            }
        }
        found
    }
}

impl Producer for AsymptoteProducer {
    fn name(&self) -> &'static str {
        "asymptote"
    }

    fn source(&self, target: &Target, session: &SynthesisSession) -> Option<String> {
        let source = target.sibling("asy");
        session.is_available(&source).then_some(source)
    }

    fn produce(&self, target: &Target, source: &str, session: &mut SynthesisSession) {
        let modules = Self::local_modules(session, source);
        let search_path = match session.config().asymptote_dir.as_deref() {
            Some(prefix) => format!("{}:{}", prefix, Self::source_dir(source)),
            None => Self::source_dir(source),
        };

        let asy = session.config().tools.asy.clone();
        session.emit_rule(
            Rule::new(&target.name)
                .with_prerequisites([source])
                .with_prerequisites(modules)
                .with_command(format!(
                    "ASYMPTOTE_DIR={} {} -f eps -o {} {}",
                    search_path, asy, target.name, source
                )),
        );
        session.add_clean(&target.name);
    }
}
