//! Runs one synthesis end to end: corpus discovery, worklist closure, rule
//! document assembly.

use crate::config::TexmkConfig;
use crate::corpus::Corpus;
use crate::emit::{RuleDocument, PHONY_TARGETS};
use crate::error::Diagnostic;
use crate::fs::FileSystem;
use crate::graph::{BuildGraphSynthesizer, SynthesisSession, SynthesisSummary};
use crate::producers::ProducerTable;
use crate::source::CorpusOracle;
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Result of one run.
#[derive(Debug)]
pub struct SynthesisOutcome {
    pub corpus: Corpus,
    pub document: RuleDocument,
    pub summary: SynthesisSummary,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct SynthesisOrchestrator {
    config: Arc<TexmkConfig>,
    fs: Arc<dyn FileSystem>,
    producers: ProducerTable,
}

impl SynthesisOrchestrator {
    pub fn new(config: Arc<TexmkConfig>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            config,
            fs,
            producers: ProducerTable::with_defaults(),
        }
    }

    pub fn with_producers(mut self, producers: ProducerTable) -> Self {
        self.producers = producers;
        self
    }

    /// Synthesizes rules for every top-level document plus `targets`. Phony
    /// target names are not synthesized.
    pub fn synthesize(&self, targets: &[String]) -> Result<SynthesisOutcome> {
        let start = Instant::now();
        info!("Synthesizing rules for {}", self.config.root.display());

        info!("Phase: discover");
        let phase_start = Instant::now();
        let corpus = Corpus::discover(self.fs.as_ref(), &self.config.root)?;
        debug!("Phase discover complete in {:.2?}", phase_start.elapsed());

        info!("Phase: synthesize");
        let oracle = CorpusOracle::new(
            self.fs.clone(),
            self.config.root.clone(),
            corpus.handwritten_rules.clone(),
        );
        let mut session = SynthesisSession::new(self.config.clone(), self.fs.clone(), Box::new(oracle));
        for diagnostic in &corpus.diagnostics {
            session.report(diagnostic.clone());
        }
        for document in &corpus.documents {
            session.add_document(document);
        }
        for target in targets.iter().filter(|t| !PHONY_TARGETS.contains(&t.as_str())) {
            session.request(target);
        }
        let summary = BuildGraphSynthesizer::new(self.producers.clone()).run(&mut session);

        info!("Phase: emit");
        let phase_start = Instant::now();
        let document = RuleDocument::from_session(&mut session, &corpus.handwritten_rules);
        debug!("Phase emit complete in {:.2?}", phase_start.elapsed());

        info!(
            documents = corpus.documents.len(),
            rules = document.rules.len(),
            "Synthesis finished in {:.2?}",
            start.elapsed()
        );

        Ok(SynthesisOutcome {
            corpus,
            document,
            summary,
            diagnostics: session.diagnostics.into_vec(),
        })
    }
}
