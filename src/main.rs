use texmk::cli::{handle_build, resolve_config, CliArgs};
use texmk::util::{init_logging, LoggingConfig};
use texmk::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    let config = resolve_config(&args);

    let mut logging =
        LoggingConfig::from_flags(args.log_level.as_deref(), args.verbose, args.quiet, &config.log_level);
    logging.use_json = args.log_json;
    init_logging(logging);

    debug!("texmk v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = handle_build(&args, config);
    std::process::exit(exit_code);
}
