//! Reading document sources: cached views, directives, and the availability oracle.

pub mod directive;
pub mod document_class;
pub mod oracle;
pub mod scanner;

pub use directive::{Directive, Directives};
pub use document_class::DocumentClass;
pub use oracle::{AvailabilityOracle, CorpusOracle};
pub use scanner::SourceScanner;

use std::path::Path;

/// `\input{name}` or `\include{name}`; group 1 is the nested document name.
pub const NESTED_DOCUMENT_PATTERN: &str = r"\\(?:input|include)\s*\{([^}]*)\}";

/// Appends `.{ext}` when the last path component of `name` has no extension.
pub fn with_default_extension(name: &str, ext: &str) -> String {
    if Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{}.{}", name, ext)
    }
}
