//! Producer table

use super::{
    AsymptoteProducer, DiaProducer, DotProducer, ExistingImageProducer, FigDepthProducer,
    FigProducer, GnuplotProducer, Producer, RasterProducer, TreeProducer, RASTER_EXTENSIONS,
};
use crate::graph::{SynthesisSession, Target};
use std::sync::Arc;
use tracing::debug;

/// Ordered (predicate, rule factory) pairs, evaluated lazily.
#[derive(Clone)]
pub struct ProducerTable {
    producers: Vec<Arc<dyn Producer>>,
}

impl ProducerTable {
    pub fn new() -> Self {
        Self {
            producers: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for extension in RASTER_EXTENSIONS {
            table.register(Arc::new(RasterProducer::new(extension)));
        }
        table.register(Arc::new(TreeProducer));
        table.register(Arc::new(GnuplotProducer));
        table.register(Arc::new(AsymptoteProducer));
        table.register(Arc::new(DiaProducer));
        table.register(Arc::new(DotProducer));
        table.register(Arc::new(FigProducer));
        table.register(Arc::new(FigDepthProducer));
        table.register(Arc::new(ExistingImageProducer));
        table
    }

    /// Appends a producer with the lowest priority so far.
    pub fn register(&mut self, producer: Arc<dyn Producer>) {
        self.producers.push(producer);
    }

    /// Runs the first producer that has a source for `target` and returns
    /// its name.
    pub fn resolve(&self, target: &Target, session: &mut SynthesisSession) -> Option<&'static str> {
        for producer in &self.producers {
            if let Some(source) = producer.source(target, session) {
                debug!(
                    target_name = %target,
                    producer = producer.name(),
                    source = %source,
                    "Selected producer"
                );
                producer.produce(target, &source, session);
                return Some(producer.name());
            }
        }
        None
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.producers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }
}

impl Default for ProducerTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_priority_order() {
        let table = ProducerTable::with_defaults();
        let names = table.names();

        assert_eq!(table.len(), RASTER_EXTENSIONS.len() + 8);
        assert!(names[..RASTER_EXTENSIONS.len()].iter().all(|n| *n == "raster"));
        assert_eq!(
            &names[RASTER_EXTENSIONS.len()..],
            &["tree", "gnuplot", "asymptote", "dia", "dot", "fig", "fig-depth", "existing"]
        );
    }

    #[test]
    fn test_empty_table() {
        let table = ProducerTable::new();
        assert!(table.is_empty());
    }
}
