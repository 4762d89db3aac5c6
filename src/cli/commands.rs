use crate::config::Deliverable;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Build-rule synthesizer for LaTeX document pipelines
#[derive(Parser, Debug)]
#[command(
    name = "texmk",
    about = "Build-rule synthesizer for LaTeX document pipelines",
    version,
    author,
    long_about = "texmk scans a directory of LaTeX documents and figure sources, works out \
                  how every referenced artifact can be produced, and hands the resulting \
                  rules to make.\n\n\
                  Examples:\n  \
                  texmk\n  \
                  texmk paper.ps clean\n  \
                  texmk --show-rules --format json\n  \
                  texmk -C ~/papers/thesis --deliverable ps.gz"
)]
pub struct CliArgs {
    #[arg(
        value_name = "TARGET",
        help = "Targets passed to make (defaults to all deliverables)"
    )]
    pub targets: Vec<String>,

    #[arg(long, help = "Print the synthesized rules instead of running make")]
    pub show_rules: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "make",
        help = "Format used by --show-rules"
    )]
    pub format: RulesFormatArg,

    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        help = "Corpus directory (defaults to current directory)"
    )]
    pub directory: Option<PathBuf>,

    #[arg(long, value_name = "SIZE", help = "Paper size passed to dvips")]
    pub paper: Option<String>,

    #[arg(
        long,
        value_parser = parse_deliverable,
        help = "Primary output for each document: pdf, ps or ps.gz"
    )]
    pub deliverable: Option<Deliverable>,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only errors are logged"
    )]
    pub quiet: bool,

    #[arg(long, help = "Log as JSON lines on stderr")]
    pub log_json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesFormatArg {
    Make,
    Json,
    Yaml,
}

impl From<RulesFormatArg> for super::output::OutputFormat {
    fn from(arg: RulesFormatArg) -> Self {
        match arg {
            RulesFormatArg::Make => super::output::OutputFormat::Make,
            RulesFormatArg::Json => super::output::OutputFormat::Json,
            RulesFormatArg::Yaml => super::output::OutputFormat::Yaml,
        }
    }
}

fn parse_deliverable(s: &str) -> Result<Deliverable, String> {
    s.parse::<Deliverable>().map_err(|e| e.to_string())
}
