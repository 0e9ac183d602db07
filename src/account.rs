use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type AccountId = String;
pub type MovementId = u64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("{kind:?} would overflow the balance")]
    BalanceOverflow { kind: MovementKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Deposit,
    Withdrawal,
    OutgoingTransfer,
}

/// Single balance-affecting event. The amount is always the magnitude,
/// the direction follows from [`MovementKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    id: MovementId,
    at: DateTime<Utc>,
    kind: MovementKind,
    amount: Decimal,
}

impl Movement {
    pub fn new(id: MovementId, at: DateTime<Utc>, kind: MovementKind, amount: Decimal) -> Self {
        Self {
            id,
            at,
            kind,
            amount,
        }
    }

    pub fn id(&self) -> MovementId {
        self.id
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    balance: Decimal,
    #[serde(default)]
    movements: Vec<Movement>,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, balance: Decimal) -> Self {
        Self {
            id: id.into(),
            balance,
            movements: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Creates a movement stamped with the current time and applies it.
    pub fn record(
        &mut self,
        kind: MovementKind,
        amount: Decimal,
    ) -> Result<&Movement, AccountError> {
        let movement = Movement::new(self.next_movement_id(), Utc::now(), kind, amount);
        self.apply(movement)
    }

    /// Balance and history change together, there is no way to do one without the other.
    /// On overflow neither is touched.
    pub fn apply(&mut self, movement: Movement) -> Result<&Movement, AccountError> {
        let balance = match movement.kind {
            MovementKind::Deposit => self.balance.checked_add(movement.amount),
            MovementKind::Withdrawal | MovementKind::OutgoingTransfer => {
                self.balance.checked_sub(movement.amount)
            }
        }
        .ok_or(AccountError::BalanceOverflow {
            kind: movement.kind,
        })?;
        self.balance = balance;
        self.movements.push(movement);
        Ok(&self.movements[self.movements.len() - 1])
    }

    fn next_movement_id(&self) -> MovementId {
        self.movements.last().map_or(1, |last| last.id + 1)
    }
}
