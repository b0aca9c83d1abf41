mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bio_table=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let ok = match cli.command {
        Commands::Run {
            source,
            delimiter,
            files,
            placeholder,
        } => cli::run(source, delimiter, files, placeholder).await?,
        Commands::Convert { bio, delimiter } => {
            cli::convert(&bio, &delimiter);
            true
        }
        Commands::Fetch { source } => cli::fetch(source).await?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
