use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BANK_NOT_FOUND, BankError},
    store::Store,
};

pub type BankId = u32;

/// Partner bank reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub id: BankId,
    pub name: String,
    pub withdrawal_commission: Decimal,
    /// Reference data only. Transfers are charged the rate from
    /// [`TransferPolicy`](crate::config::TransferPolicy), never this one.
    pub transfer_commission: Decimal,
}

/// Read only lookup of partner banks by name.
pub struct BankDirectory<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S> BankDirectory<'s, S>
where
    S: Store + ?Sized,
{
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn lookup(&self, name: &str) -> Result<Bank, BankError> {
        self.store
            .find_bank_by_name(name)
            .ok_or(BankError::NotFound(BANK_NOT_FOUND))
    }
}
