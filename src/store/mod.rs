use thiserror::Error;

use crate::{
    account::Account,
    bank::Bank,
    card::{Card, PinDigest},
};

pub mod in_memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
}

/// Key-value access to the persisted entities.
///
/// Lookups hand out owned copies. A `save_*` call replaces the whole record,
/// so an account's balance and its movement list are written as one unit.
/// Implementations backed by a shared database must serialise writes to the
/// same account themselves.
pub trait Store {
    fn find_account(&self, id: &str) -> Option<Account>;

    fn save_account(&mut self, account: &Account) -> Result<(), StoreError>;

    fn find_card(&self, id: &str) -> Option<Card>;

    fn find_card_by_pin(&self, id: &str, digest: &PinDigest) -> Option<Card>;

    fn save_card(&mut self, card: &Card) -> Result<(), StoreError>;

    fn find_bank_by_name(&self, name: &str) -> Option<Bank>;
}
