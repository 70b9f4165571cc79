//! stackoverflow-tags CLI
//!
//! Fetches every Stack Overflow tag and writes them to a CSV file

use clap::Parser;
use stackoverflow_tags::cli::{Cli, Runner};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .init();

    info!("START");

    let strict = cli.strict;
    let runner = Runner::new(cli);

    let code = match runner.run().await {
        Ok(summary) => summary.exit_code(strict),
        Err(e) => {
            error!("{e}");
            1
        }
    };

    info!("END");
    std::process::exit(code);
}
