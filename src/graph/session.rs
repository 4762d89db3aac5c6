use super::{Rule, RuleSet, TrashManifest, Worklist};
use crate::config::TexmkConfig;
use crate::error::{Diagnostic, Diagnostics};
use crate::extract::DependencyList;
use crate::fs::FileSystem;
use crate::source::{AvailabilityOracle, Directives, SourceScanner};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, trace};

/// Everything one synthesis run owns: the worklist, the rules and trash
/// collected so far, the source cache, and the diagnostics.
pub struct SynthesisSession {
    config: Arc<TexmkConfig>,
    pub(crate) scanner: SourceScanner,
    oracle: Box<dyn AvailabilityOracle>,
    pub(crate) worklist: Worklist,
    pub(crate) rules: RuleSet,
    pub(crate) trash: TrashManifest,
    pub(crate) diagnostics: Diagnostics,
    requested: BTreeSet<String>,
    deliverables: Vec<String>,
    documents: Vec<String>,
    document_dependencies: BTreeMap<String, DependencyList>,
    resolutions: usize,
}

impl SynthesisSession {
    pub fn new(
        config: Arc<TexmkConfig>,
        fs: Arc<dyn FileSystem>,
        oracle: Box<dyn AvailabilityOracle>,
    ) -> Self {
        let scanner = SourceScanner::new(fs, config.root.clone());
        Self {
            config,
            scanner,
            oracle,
            worklist: Worklist::default(),
            rules: RuleSet::default(),
            trash: TrashManifest::default(),
            diagnostics: Diagnostics::default(),
            requested: BTreeSet::new(),
            deliverables: Vec::new(),
            documents: Vec::new(),
            document_dependencies: BTreeMap::new(),
            resolutions: 0,
        }
    }

    pub fn config(&self) -> &TexmkConfig {
        &self.config
    }

    /// Adds `name` to the worklist unless it was seen before.
    pub fn enqueue(&mut self, name: &str) -> bool {
        let added = self.worklist.enqueue(name);
        if added {
            trace!(target_name = %name, "Enqueued");
        }
        added
    }

    /// Enqueues `name` and remembers that it was asked for explicitly.
    pub fn request(&mut self, name: &str) {
        self.requested.insert(name.to_string());
        self.enqueue(name);
    }

    pub fn is_requested(&self, name: &str) -> bool {
        self.requested.contains(name)
    }

    /// Registers a top-level document and requests its deliverable.
    pub fn add_document(&mut self, document: &str) {
        if self.documents.iter().any(|d| d == document) {
            return;
        }
        let root = document.strip_suffix(".tex").unwrap_or(document);
        let deliverable = format!("{}.{}", root, self.config.deliverable.extension());

        self.documents.push(document.to_string());
        self.deliverables.push(deliverable.clone());
        self.request(&deliverable);
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn deliverables(&self) -> &[String] {
        &self.deliverables
    }

    pub fn is_available(&self, name: &str) -> bool {
        self.oracle.is_available(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.scanner.exists(name)
    }

    pub fn read_raw(&mut self, name: &str) -> Arc<str> {
        self.scanner.read_raw(name, &mut self.diagnostics)
    }

    pub fn read_stripped(&mut self, name: &str) -> String {
        self.scanner.read_stripped(name, &mut self.diagnostics)
    }

    pub fn read_expanded(&mut self, name: &str) -> String {
        self.scanner.read_expanded(name, &mut self.diagnostics)
    }

    pub fn directives(&mut self, name: &str) -> Directives {
        Directives::parse(&self.read_raw(name))
    }

    /// Adds `rule` unless its target already has one.
    pub fn emit_rule(&mut self, rule: Rule) -> bool {
        let target = rule.target.clone();
        let added = self.rules.insert(rule);
        if added {
            debug!(target_name = %target, "Emitted rule");
        } else {
            debug!(target_name = %target, "Rule already present, keeping the first");
        }
        added
    }

    pub fn add_clean(&mut self, name: impl Into<String>) {
        self.trash.add_clean(name);
    }

    pub fn add_bare(&mut self, name: impl Into<String>) {
        self.trash.add_bare(name);
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.report(diagnostic);
    }

    pub(crate) fn record_document_dependencies(&mut self, document: &str, deps: DependencyList) {
        self.document_dependencies.insert(document.to_string(), deps);
    }

    pub fn document_dependencies(&self, document: &str) -> Option<&DependencyList> {
        self.document_dependencies.get(document)
    }

    pub(crate) fn count_resolution(&mut self) {
        self.resolutions += 1;
    }

    /// Number of targets popped and resolved so far.
    pub fn resolutions(&self) -> usize {
        self.resolutions
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn trash(&self) -> &TrashManifest {
        &self.trash
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn worklist(&self) -> &Worklist {
        &self.worklist
    }
}
