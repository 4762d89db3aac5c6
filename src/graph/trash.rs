use serde::Serialize;
use std::collections::BTreeSet;

/// Files removed by the cleanup targets. `clean` holds regenerable
/// intermediates; `bare` holds deliverables, removed together with `clean`.
#[derive(Debug, Default, Clone, Serialize)]
pub struct TrashManifest {
    clean: BTreeSet<String>,
    bare: BTreeSet<String>,
}

impl TrashManifest {
    pub fn add_clean(&mut self, name: impl Into<String>) {
        self.clean.insert(name.into());
    }

    pub fn add_bare(&mut self, name: impl Into<String>) {
        self.bare.insert(name.into());
    }

    pub fn clean(&self) -> &BTreeSet<String> {
        &self.clean
    }

    pub fn bare(&self) -> &BTreeSet<String> {
        &self.bare
    }
}
