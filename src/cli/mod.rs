pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, RulesFormatArg};
pub use handlers::{handle_build, resolve_config};
pub use output::{OutputFormat, OutputFormatter};
