//! dbprobe - Command-line database connectivity checker.

use clap::Parser;

use dbprobe_cli::cli::Cli;
use dbprobe_cli::error::CliResult;
use dbprobe_cli::{drivers, logging, output, run};

#[tokio::main]
async fn main() {
    // Run the CLI and handle errors
    if let Err(e) = start().await {
        output::report(&e);
        std::process::exit(e.exit_code());
    }
}

async fn start() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let registry = drivers::registry();
    run::run(&cli, &registry).await
}
