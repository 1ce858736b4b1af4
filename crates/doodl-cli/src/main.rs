use clap::Parser;
use doodl_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logging goes to the state file; fall back to stderr if it cannot be opened.
    if logging::init_logging(cli.verbose).is_err() {
        logging::init_logging_stderr(cli.verbose);
    }

    match cli.run().await {
        Ok(summary) if summary.all_succeeded() => {}
        Ok(_) => std::process::exit(1),
        Err(err) => {
            eprintln!("doodl error: {:#}", err);
            std::process::exit(1);
        }
    }
}
