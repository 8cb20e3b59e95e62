use chunk_cidr::cli::{self, Cli};
use chunk_cidr::config::Config;
use chunk_cidr::logging;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("error initializing logging: {e}");
    }
    log::info!("#Start main()");

    let result = Config::from_env().and_then(|config| cli::run(&cli, config));
    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            log::debug!("{e}");
            eprintln!("error: {e}");
            ExitCode::from(cli::EXIT_SPLIT_ERROR)
        }
    }
}
