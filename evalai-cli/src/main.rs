use std::process::ExitCode;

use clap::Parser;
use evalai_cli::cli::Cli;
use evalai_cli::{ConfigLoader, RunError, connect_http, run_demo};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("❌ Error running evaluation: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), RunError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let mut config = ConfigLoader::load().map_err(RunError::Config)?;
    cli.apply(&mut config);

    let connect = connect_http(config.client.clone());
    run_demo(&config, connect, &mut std::io::stdout()).await?;
    Ok(())
}
