//! obcli - Open Banking API command-line client.
//!
//! Usage:
//! ```bash
//! obcli config set --access-token "$TOKEN"
//! obcli accounts list
//! obcli balances get 22289 --json
//! ```

use clap::Parser;
use obcli::cli::{self, Cli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout stays clean for `--json` output.
///
/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},hyper_util=warn,rustls=warn", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = std::io::stdout().lock();
    match cli::run(cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e.report());
            ExitCode::FAILURE
        }
    }
}
