//! Bootstraps [`card_ledger`](crate) for the batch binary: seeds the in-memory store from a
//! [`Config`], replays CSV operations against it and prints the resulting accounts.

use std::io::{Read, Write};

use crate::{
    config::Config,
    processor::{
        CommandProcessor, Outcome, ProcessError, in_memory_processor::InMemoryBankProcessor,
    },
};
use anyhow::Result;
use csv_parser::CsvOperationParser;
use csv_printer::print_accounts;
use tracing::{info, warn};
pub mod csv_parser;
pub mod csv_printer;

/// Failures reported for a single input line.
#[derive(Debug)]
pub enum LineError {
    Malformed(csv::Error),
    Rejected(ProcessError),
}

pub struct Service<'w, R, W: 'w> {
    pub config: Config,
    pub input: R,
    pub output: &'w mut W,
    pub outcome_printer: Box<dyn FnMut(u64, Outcome)>,
    pub error_printer: Box<dyn FnMut(u64, LineError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut processor = InMemoryBankProcessor::from_config(self.config);
        let (mut succeeded, mut failed) = (0usize, 0usize);

        for (line, row) in parser {
            let result = match row {
                Ok(op) => processor
                    .process_operation(op.kind, &op.target, op.args())
                    .map_err(LineError::Rejected),
                Err(err) => Err(LineError::Malformed(err)),
            };
            match result {
                Ok(outcome) => {
                    succeeded += 1;
                    (self.outcome_printer)(line, outcome);
                }
                Err(err) => {
                    failed += 1;
                    warn!(line, ?err, "operation failed");
                    (self.error_printer)(line, err);
                }
            }
        }
        info!(succeeded, failed, "operations replayed");

        print_accounts(self.output, &processor.store.accounts())
    }
}
