//! texmk - build-rule synthesizer for LaTeX document pipelines
//!
//! Given a directory of documents and figure sources, texmk discovers the
//! dependency graph implied by `\includegraphics`, `\input`, bibliography
//! and package references, picks a way to produce every referenced
//! artifact, and emits a GNU make rule set for it.
//!
//! # Core Concepts
//!
//! - **Synthesis session**: one run's worklist, rules, trash sets, source
//!   cache, and diagnostics ([`SynthesisSession`])
//! - **Producers**: ordered strategies for making a `.eps` from some other
//!   source format ([`producers::ProducerTable`])
//! - **Availability oracle**: "exists on disk, or named by a hand-authored
//!   rule" ([`source::AvailabilityOracle`])
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use texmk::{RealFileSystem, SynthesisOrchestrator, TexmkConfig};
//!
//! let config = Arc::new(TexmkConfig::with_root("paper"));
//! let outcome = SynthesisOrchestrator::new(config, Arc::new(RealFileSystem::new()))
//!     .synthesize(&[])?;
//! print!("{}", outcome.document.to_makefile());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod corpus;
pub mod emit;
pub mod error;
pub mod executor;
pub mod extract;
pub mod fs;
pub mod graph;
pub mod orchestrator;
pub mod producers;
pub mod resolve;
pub mod source;
pub mod spell;
pub mod util;

pub use config::{ConfigError, Deliverable, TexmkConfig};
pub use emit::RuleDocument;
pub use error::{Diagnostic, SetupError};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use graph::{BuildGraphSynthesizer, Rule, SynthesisSession, SynthesisSummary};
pub use orchestrator::{SynthesisOrchestrator, SynthesisOutcome};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
