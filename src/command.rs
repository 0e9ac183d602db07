use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::card::Pin;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Movements,
    Transfer,
    Withdraw,
    Deposit,
    Activate,
    ChangePin,
    GetLimit,
    SetLimit,
}

/// Optional arguments of an operation, which ones are needed depends on the [`OperationKind`].
#[derive(Debug, Clone, Default)]
pub struct CommandArgs {
    pub pin: Option<Pin>,
    pub new_pin: Option<Pin>,
    pub amount: Option<Decimal>,
    pub bank: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Pin is required for {kind:?}")]
    PinRequired { kind: OperationKind },
    #[error("New pin is required for {kind:?}")]
    NewPinRequired { kind: OperationKind },
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Amount must be positive for {kind:?}")]
    NonPositiveAmount { kind: OperationKind },
    #[error("Terminal bank is required for {kind:?}")]
    BankRequired { kind: OperationKind },
    #[error("Destination is required for {kind:?}")]
    DestinationRequired { kind: OperationKind },
}

#[derive(Debug, Clone, PartialEq)]
pub enum BankCommand {
    ListMovements {
        account: String,
    },
    Transfer {
        origin: String,
        destination: String,
        amount: Decimal,
    },
    Withdraw {
        card: String,
        pin: Pin,
        amount: Decimal,
        bank: String,
    },
    Deposit {
        card: String,
        pin: Pin,
        amount: Decimal,
        bank: String,
    },
    Activate {
        card: String,
        pin: Pin,
    },
    ChangePin {
        card: String,
        pin: Pin,
        new_pin: Pin,
    },
    GetLimit {
        card: String,
        pin: Pin,
    },
    SetLimit {
        card: String,
        pin: Pin,
        new_limit: Decimal,
    },
}

impl BankCommand {
    /// `target` is the account id for account operations and the card id for card operations.
    pub fn parse_command(
        kind: OperationKind,
        target: &str,
        args: CommandArgs,
    ) -> Result<Self, CommandError> {
        let target = target.to_owned();
        match kind {
            OperationKind::Movements => Ok(Self::ListMovements { account: target }),
            OperationKind::Transfer => Ok(Self::Transfer {
                origin: target,
                destination: args
                    .destination
                    .ok_or(CommandError::DestinationRequired { kind })?,
                amount: Self::parse_amount(kind, args.amount)?,
            }),
            OperationKind::Withdraw => Ok(Self::Withdraw {
                card: target,
                pin: Self::parse_pin(kind, args.pin)?,
                amount: Self::parse_amount(kind, args.amount)?,
                bank: args.bank.ok_or(CommandError::BankRequired { kind })?,
            }),
            OperationKind::Deposit => Ok(Self::Deposit {
                card: target,
                pin: Self::parse_pin(kind, args.pin)?,
                amount: Self::parse_amount(kind, args.amount)?,
                bank: args.bank.ok_or(CommandError::BankRequired { kind })?,
            }),
            OperationKind::Activate => Ok(Self::Activate {
                card: target,
                pin: Self::parse_pin(kind, args.pin)?,
            }),
            OperationKind::ChangePin => Ok(Self::ChangePin {
                card: target,
                pin: Self::parse_pin(kind, args.pin)?,
                new_pin: args.new_pin.ok_or(CommandError::NewPinRequired { kind })?,
            }),
            OperationKind::GetLimit => Ok(Self::GetLimit {
                card: target,
                pin: Self::parse_pin(kind, args.pin)?,
            }),
            OperationKind::SetLimit => Ok(Self::SetLimit {
                card: target,
                pin: Self::parse_pin(kind, args.pin)?,
                // range is checked against the card policy, not here
                new_limit: args.amount.ok_or(CommandError::AmountRequired { kind })?,
            }),
        }
    }

    fn parse_pin(kind: OperationKind, pin: Option<Pin>) -> Result<Pin, CommandError> {
        pin.ok_or(CommandError::PinRequired { kind })
    }

    fn parse_amount(kind: OperationKind, amount: Option<Decimal>) -> Result<Decimal, CommandError> {
        let Some(amount) = amount else {
            return Err(CommandError::AmountRequired { kind });
        };
        if amount > Decimal::ZERO {
            Ok(amount)
        } else {
            Err(CommandError::NonPositiveAmount { kind })
        }
    }
}
