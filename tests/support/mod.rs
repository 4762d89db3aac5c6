#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use texmk::fs::{FileSystem, MockFileSystem, RealFileSystem};
use texmk::source::CorpusOracle;
use texmk::{Rule, SynthesisOrchestrator, SynthesisOutcome, SynthesisSession, TexmkConfig};

pub fn fixture_path(category: &str, name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(category)
        .join(name)
}

/// Runs a full synthesis over an on-disk corpus with built-in tool names.
pub fn synthesize_dir(root: PathBuf) -> SynthesisOutcome {
    let config = Arc::new(TexmkConfig::builtin(root));
    SynthesisOrchestrator::new(config, Arc::new(RealFileSystem::new()))
        .synthesize(&[])
        .expect("Synthesis failed")
}

/// A session over an in-memory corpus rooted at `/mock`.
pub fn mock_session(fs: MockFileSystem, handwritten_rules: &str) -> SynthesisSession {
    let fs: Arc<dyn FileSystem> = Arc::new(fs);
    let config = Arc::new(TexmkConfig::builtin("/mock"));
    let oracle = Box::new(CorpusOracle::new(
        fs.clone(),
        "/mock",
        handwritten_rules.to_string(),
    ));
    SynthesisSession::new(config, fs, oracle)
}

pub fn rule<'a>(outcome: &'a SynthesisOutcome, target: &str) -> &'a Rule {
    outcome
        .document
        .rules
        .iter()
        .find(|r| r.target == target)
        .unwrap_or_else(|| panic!("No rule for {}", target))
}

pub fn has_rule(outcome: &SynthesisOutcome, target: &str) -> bool {
    outcome.document.rules.iter().any(|r| r.target == target)
}
