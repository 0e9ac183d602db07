use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::Movement,
    command::{CommandArgs, CommandError, OperationKind},
    error::BankError,
};

pub mod in_memory_processor;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    BankErr(#[from] BankError),
}

/// What a successful operation hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Done,
    Commission(Decimal),
    Limit(Decimal),
    Movements(Vec<Movement>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Done => write!(f, "ok"),
            Outcome::Commission(commission) => write!(f, "commission {}", commission.normalize()),
            Outcome::Limit(limit) => write!(f, "limit {}", limit.normalize()),
            Outcome::Movements(movements) => {
                write!(f, "{} movement(s)", movements.len())?;
                for movement in movements {
                    write!(
                        f,
                        "\n  #{} {} {:?} {}",
                        movement.id(),
                        movement.at().to_rfc3339(),
                        movement.kind(),
                        movement.amount().normalize()
                    )?;
                }
                Ok(())
            }
        }
    }
}

pub trait CommandProcessor {
    fn process_operation(
        &mut self,
        kind: OperationKind,
        target: &str,
        args: CommandArgs,
    ) -> Result<Outcome, ProcessError>;
}
