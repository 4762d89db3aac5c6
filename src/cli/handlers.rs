use super::commands::CliArgs;
use super::output::OutputFormatter;
use crate::config::TexmkConfig;
use crate::error::SetupError;
use crate::executor::{MakeExecutor, RuleFile};
use crate::fs::RealFileSystem;
use crate::orchestrator::SynthesisOrchestrator;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const EXIT_CONFIG_ERROR: i32 = 1;
pub const EXIT_RULE_DESTINATION: i32 = 3;

/// Builds the effective configuration: environment first, flags on top.
pub fn resolve_config(args: &CliArgs) -> TexmkConfig {
    let mut config = TexmkConfig::default();
    if let Some(dir) = &args.directory {
        config.root = dir.clone();
    }
    if let Some(paper) = &args.paper {
        config.paper = paper.clone();
    }
    if let Some(deliverable) = args.deliverable {
        config.deliverable = deliverable;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    }
    config
}

/// Synthesizes, then either prints the rules or runs make on them. Returns
/// the process exit status.
pub fn handle_build(args: &CliArgs, config: TexmkConfig) -> i32 {
    if let Err(e) = config.validate() {
        error!("{}", e);
        return EXIT_CONFIG_ERROR;
    }
    debug!("{}", config);

    let config = Arc::new(config);
    let orchestrator = SynthesisOrchestrator::new(config.clone(), Arc::new(RealFileSystem::new()));
    let outcome = match orchestrator.synthesize(&args.targets) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    let rule_file = match RuleFile::create(&config.rules_dir, &outcome.document.to_makefile()) {
        Ok(file) => file,
        Err(e @ SetupError::RuleDestination { .. }) => {
            error!("{}", e);
            return EXIT_RULE_DESTINATION;
        }
        Err(e) => {
            error!("{}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    if args.show_rules {
        let formatter = OutputFormatter::new(args.format.into());
        return match formatter.format(&outcome.document) {
            Ok(output) => {
                print!("{}", output);
                let path = rule_file.persist();
                info!("Rules kept at {}", path.display());
                0
            }
            Err(e) => {
                error!("{:#}", e);
                EXIT_CONFIG_ERROR
            }
        };
    }

    let executor = MakeExecutor::new(config.make.clone(), config.root.clone());
    match executor.run(rule_file.path(), &args.targets) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            EXIT_CONFIG_ERROR
        }
    }
}
