//! Doctor Finder command-line client

use std::process::ExitCode;

use clap::Parser;
use doctorfinder_cli::logging::init_tracing;
use doctorfinder_cli::{Cli, ClientContext};
use doctorfinder_domain::DoctorFinderError;
use doctorfinder_infra::config;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing("warn")?;

    if let Err(err) = dotenv {
        debug!(error = %err, "No .env loaded");
    }

    let outcome = async {
        let config = config::load()?;
        let context = ClientContext::new(config)?;
        cli.command.run(&context).await
    }
    .await;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            report(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[allow(clippy::print_stderr)]
fn report(err: &DoctorFinderError) {
    error!(error_type = err.label(), "command failed");
    eprintln!("{}", err.message());
}
