use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use leadhq::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "main: could not read .env");
        }
    }

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let stdin = std::io::stdin();

    match cli::run(cli, &mut stdout.lock(), &mut stdin.lock()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
