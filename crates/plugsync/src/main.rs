mod cli;

use std::process::ExitCode;

use clap::Parser;
use log::debug;
use plugsync_core::distribution::RunConfiguration;
use plugsync_core::kernel::constants::{APP_NAME, APP_VERSION};
use plugsync_core::{DistributionEngine, KernelError, Settings};

use crate::cli::{CliArgs, print_report};

/// Invalid arguments or configuration, same code clap uses for usage errors
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();
    debug!("{} {}", APP_NAME, APP_VERSION);

    let config = match prepare(&args).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };
    debug!("Run configuration: {:?}", config);

    let result = match DistributionEngine::local().run(config).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print_report(&result);

    if args.strict && result.has_failures() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn prepare(args: &CliArgs) -> Result<RunConfiguration, KernelError> {
    let settings = match &args.config {
        Some(path) => Settings::load(path).await?,
        None => Settings::default(),
    };
    Ok(args.to_configuration(&settings)?)
}
