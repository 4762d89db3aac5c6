//! Configuration management for texmk
//!
//! Settings are loaded from environment variables with defaults, then selectively
//! overridden by command-line flags.
//!
//! # Environment Variables
//!
//! - `TEXMK_LOG_LEVEL`: Logging level - default: "info"
//! - `TEXMK_PAPER`: Page size handed to dvips - default: "letter"
//! - `TEXMK_DELIVERABLE`: Primary output per document (pdf|ps|ps.gz) - default: "pdf"
//! - `TEXMK_GRAPHIC_EXT`: Extension appended to graphics named without one - default: "eps"
//! - `TEXMK_MAKE`: Build executor command - default: "make"
//! - `TEXMK_RULES_DIR`: Where the generated rule file is written - default: system temp dir
//! - `TEXMK_<TOOL>`: Command for an external tool, e.g. `TEXMK_LATEX=pdflatex`
//! - `ASYMPTOTE_DIR`: Colon-joined module search prefix for Asymptote sources

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PAPER: &str = "letter";
const DEFAULT_GRAPHIC_EXT: &str = "eps";
const DEFAULT_MAKE: &str = "make";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid deliverable: {0}. Valid options: pdf, ps, ps.gz")]
    InvalidDeliverable(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Primary output artifact built for every top-level document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deliverable {
    Pdf,
    Ps,
    PsGz,
}

impl Deliverable {
    pub fn extension(self) -> &'static str {
        match self {
            Deliverable::Pdf => "pdf",
            Deliverable::Ps => "ps",
            Deliverable::PsGz => "ps.gz",
        }
    }
}

impl FromStr for Deliverable {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_start_matches('.') {
            "pdf" => Ok(Deliverable::Pdf),
            "ps" => Ok(Deliverable::Ps),
            "ps.gz" | "psgz" => Ok(Deliverable::PsGz),
            _ => Err(ConfigError::InvalidDeliverable(s.to_string())),
        }
    }
}

impl fmt::Display for Deliverable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// External commands written into recipes. They are opaque to texmk.
#[derive(Debug, Clone)]
pub struct ToolCommands {
    pub latex: String,
    pub bibtex: String,
    pub dvips: String,
    pub ps2pdf: String,
    pub psnup: String,
    pub gzip: String,
    pub convert: String,
    pub fig2dev: String,
    pub gnuplot: String,
    pub asy: String,
    pub dia: String,
    pub dot: String,
    pub tree2fig: String,
    pub spell: String,
}

impl Default for ToolCommands {
    fn default() -> Self {
        Self::from_lookup(&env_lookup)
    }
}

impl ToolCommands {
    /// Reads `TEXMK_<TOOL>` overrides through `lookup`.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        let tool = |name: &str, default: &str| {
            lookup(&format!("TEXMK_{}", name))
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            latex: tool("LATEX", "latex"),
            bibtex: tool("BIBTEX", "bibtex"),
            dvips: tool("DVIPS", "dvips"),
            ps2pdf: tool("PS2PDF", "ps2pdf"),
            psnup: tool("PSNUP", "psnup"),
            gzip: tool("GZIP", "gzip"),
            convert: tool("CONVERT", "convert"),
            fig2dev: tool("FIG2DEV", "fig2dev"),
            gnuplot: tool("GNUPLOT", "gnuplot"),
            asy: tool("ASY", "asy"),
            dia: tool("DIA", "dia"),
            dot: tool("DOT", "dot"),
            tree2fig: tool("TREE2FIG", "tree2fig"),
            spell: tool("SPELL", "aspell --mode=tex check"),
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

#[derive(Debug, Clone)]
pub struct TexmkConfig {
    /// Directory holding the document corpus; rule names are relative to it.
    pub root: PathBuf,
    pub log_level: String,
    pub paper: String,
    pub deliverable: Deliverable,
    pub default_graphic_ext: String,
    pub make: String,
    pub rules_dir: PathBuf,
    /// Raw `ASYMPTOTE_DIR` value, if set.
    pub asymptote_dir: Option<String>,
    pub tools: ToolCommands,
}

impl Default for TexmkConfig {
    fn default() -> Self {
        Self::from_lookup(&env_lookup)
    }
}

impl TexmkConfig {
    /// Builds a configuration from `lookup`, which maps variable names to
    /// values the way the process environment does.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        let log_level = lookup("TEXMK_LOG_LEVEL")
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let paper = lookup("TEXMK_PAPER").unwrap_or_else(|| DEFAULT_PAPER.to_string());

        let deliverable = lookup("TEXMK_DELIVERABLE")
            .and_then(|v| v.parse::<Deliverable>().ok())
            .unwrap_or(Deliverable::Pdf);

        let default_graphic_ext = lookup("TEXMK_GRAPHIC_EXT")
            .map(|v| v.trim_start_matches('.').to_string())
            .unwrap_or_else(|| DEFAULT_GRAPHIC_EXT.to_string());

        let make = lookup("TEXMK_MAKE").unwrap_or_else(|| DEFAULT_MAKE.to_string());

        let rules_dir = lookup("TEXMK_RULES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);

        let asymptote_dir = lookup("ASYMPTOTE_DIR").filter(|v| !v.is_empty());

        Self {
            root: PathBuf::from("."),
            log_level,
            paper,
            deliverable,
            default_graphic_ext,
            make,
            rules_dir,
            asymptote_dir,
            tools: ToolCommands::from_lookup(lookup),
        }
    }

    /// Built-in defaults only, ignoring the environment.
    pub fn builtin(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::from_lookup(&|_| None)
        }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if self.paper.trim().is_empty() || self.paper.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid paper size: {:?}",
                self.paper
            )));
        }

        if self.default_graphic_ext.is_empty() || self.default_graphic_ext.contains('/') {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid default graphic extension: {:?}",
                self.default_graphic_ext
            )));
        }

        if self.make.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Executor command cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Module search directories from `ASYMPTOTE_DIR`, in order.
    pub fn asymptote_search_path(&self) -> Vec<PathBuf> {
        self.asymptote_dir
            .as_deref()
            .map(|v| {
                v.split(':')
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for TexmkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "texmk configuration:")?;
        writeln!(f, "  Root: {}", self.root.display())?;
        writeln!(f, "  Deliverable: {}", self.deliverable)?;
        writeln!(f, "  Paper: {}", self.paper)?;
        writeln!(f, "  Graphic extension: {}", self.default_graphic_ext)?;
        writeln!(f, "  Executor: {}", self.make)?;
        writeln!(f, "  Rules dir: {}", self.rules_dir.display())?;
        write!(f, "  Log level: {}", self.log_level)
    }
}
