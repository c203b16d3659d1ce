use std::io::Read;
use std::process::ExitCode;

use pyreq_cli::{Request, dispatch};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the response record.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut raw = String::new();
    if let Err(error) = std::io::stdin().read_to_string(&mut raw) {
        tracing::error!(%error, "failed to read request from stdin");
        return ExitCode::FAILURE;
    }

    match Request::from_json(&raw).and_then(|request| dispatch(&request)) {
        Ok(record) => {
            println!("{record}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "request failed");
            ExitCode::FAILURE
        }
    }
}
