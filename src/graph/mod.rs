//! Build graph state: targets, rules, the worklist, and the synthesis session.

pub mod rule;
pub mod session;
pub mod synthesizer;
pub mod target;
pub mod trash;
pub mod worklist;

pub use rule::{Rule, RuleSet};
pub use session::SynthesisSession;
pub use synthesizer::{BuildGraphSynthesizer, SynthesisSummary};
pub use target::{ArtifactKind, Target};
pub use trash::TrashManifest;
pub use worklist::Worklist;
