use std::io::Read;

use crate::{
    card::Pin,
    command::{CommandArgs, OperationKind},
};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub target: String,
    pub pin: Option<Pin>,
    pub new_pin: Option<Pin>,
    pub amount: Option<Decimal>,
    pub bank: Option<String>,
    pub destination: Option<String>,
}

impl Operation {
    pub fn args(&self) -> CommandArgs {
        CommandArgs {
            pin: self.pin,
            new_pin: self.new_pin,
            amount: self.amount,
            bank: self.bank.clone(),
            destination: self.destination.clone(),
        }
    }
}

/// Parses operation list in CSV format, one operation per row.
///
/// Rows that cannot be deserialized are yielded as errors together with their line.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Operation>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Operation>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
