use std::fs::File;

use anyhow::{Context, Result};
use card_ledger::{
    bin_utils::{LineError, Service},
    config::Config,
    processor::{Outcome, ProcessError},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .context("Expected a config file name as the first argument")?;
    let operations_path = args
        .next()
        .context("Expected an operations file name as the second argument")?;

    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config `{config_path}`"))?;
    let file = File::open(&operations_path)
        .with_context(|| format!("Failed to open `{operations_path}`"))?;

    let service = Service {
        config,
        input: file,
        output: &mut std::io::stdout(),
        outcome_printer: Box::new(|line: u64, outcome: Outcome| {
            eprintln!("Line {line}: {outcome}")
        }),
        error_printer: Box::new(|line: u64, err: LineError| match err {
            LineError::Malformed(err) => eprintln!("Error at line {line}: {err}"),
            LineError::Rejected(ProcessError::CommandErr(err)) => {
                eprintln!("Error at line {line}: {err}")
            }
            LineError::Rejected(ProcessError::BankErr(err)) => {
                eprintln!("Rejected at line {line}: {err}")
            }
        }),
    };
    service.run()
}
