//! atr binary entry point.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use atrclient::cli::{self, Cli};
use atrclient::ui::output;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // ATR_LOG overrides --debug; logging is off otherwise.
    let filter = EnvFilter::try_from_env("ATR_LOG").unwrap_or_else(|_| {
        if cli.debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("off")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
