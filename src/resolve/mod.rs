//! Resolvers for the artifact kinds that do not go through the producer
//! table: the compiled-document chain, style files, and bitmaps rendered
//! from vector images.

pub mod bitmap;
pub mod document;
pub mod style;

/// Auxiliary files LaTeX and BibTeX leave next to a compiled document.
pub const AUXILIARY_EXTENSIONS: &[&str] = &["aux", "log", "bbl", "blg", "toc", "lof", "lot", "out"];
