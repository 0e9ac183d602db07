use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the transaction engine. Messages are user facing,
/// callers are expected to branch on the variant only.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub const ACCOUNT_NOT_FOUND: &str = "account does not exist";
pub const ORIGIN_NOT_FOUND: &str = "origin account does not exist";
pub const CARD_NOT_FOUND: &str = "card not found";
pub const BANK_NOT_FOUND: &str = "bank does not exist";

pub const CARD_NOT_ACTIVATED: &str = "card not activated";
pub const CARD_ALREADY_ACTIVATED: &str = "card already activated";
pub const WITHDRAWAL_ERROR: &str = "withdrawal error";
pub const WITHDRAWAL_NOT_PERMITTED: &str = "withdrawal not permitted";
pub const DEPOSIT_NOT_PERMITTED: &str = "deposit only allowed at home-bank terminals";
pub const SAME_PIN: &str = "cannot change to the same PIN";
pub const LIMIT_OUT_OF_RANGE: &str = "limit out of allowed range";
pub const AMOUNT_NOT_POSITIVE: &str = "amount must be positive";
pub const AMOUNT_OUT_OF_RANGE: &str = "amount out of range";
