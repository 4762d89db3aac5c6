//! Producers for the `.eps` vector-image intermediate.
//!
//! Each producer knows one source format. The [`ProducerTable`] tries them in
//! priority order and the first one with an available source wins. Formats
//! that go through xfig first emit a `.fig` rule and lower it with fig2dev.

use crate::graph::{SynthesisSession, Target};

pub mod asymptote;
pub mod dia;
pub mod dot;
pub mod existing;
pub mod fig;
pub mod gnuplot;
pub mod raster;
pub mod registry;
pub mod tree;

pub use asymptote::AsymptoteProducer;
pub use dia::DiaProducer;
pub use dot::DotProducer;
pub use existing::ExistingImageProducer;
pub use fig::{FigDepthProducer, FigProducer};
pub use gnuplot::GnuplotProducer;
pub use raster::{RasterProducer, RASTER_EXTENSIONS};
pub use registry::ProducerTable;
pub use tree::TreeProducer;

/// One way of making a vector image.
pub trait Producer: Send + Sync {
    fn name(&self) -> &'static str;

    /// The source this producer would build `target` from, if it is
    /// available or declared.
    fn source(&self, target: &Target, session: &SynthesisSession) -> Option<String>;

    /// Emits the rules (and trash entries) that make `target` from `source`.
    fn produce(&self, target: &Target, source: &str, session: &mut SynthesisSession);
}
