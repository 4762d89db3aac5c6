//! Spell-check commands for the `spell` phony target.

use crate::graph::SynthesisSession;
use std::collections::HashSet;

/// Produces one checker invocation per distinct `.tex` file, skipping files
/// marked `%%nospell`.
#[derive(Debug, Default)]
pub struct SpellCheckGenerator {
    seen: HashSet<String>,
}

impl SpellCheckGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands<'a, I>(&mut self, session: &mut SynthesisSession, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut commands = Vec::new();
        for name in names {
            if !name.ends_with(".tex") || !self.seen.insert(name.to_string()) {
                continue;
            }
            if session.directives(name).suppresses_spell() {
                continue;
            }
            commands.push(format!("{} {}", session.config().tools.spell, name));
        }
        commands
    }

    /// Commands for every top-level document and the documents it includes.
    pub fn for_documents(session: &mut SynthesisSession) -> Vec<String> {
        let mut names = Vec::new();
        for document in session.documents() {
            names.push(document.clone());
            if let Some(deps) = session.document_dependencies(document) {
                names.extend(deps.names().map(str::to_string));
            }
        }

        let mut generator = Self::new();
        generator.commands(session, names.iter().map(String::as_str))
    }
}
