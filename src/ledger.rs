use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    account::{Account, Movement, MovementKind},
    error::{ACCOUNT_NOT_FOUND, AMOUNT_OUT_OF_RANGE, BankError},
    store::{Store, StoreError},
};

/// Mechanical balance changes for a single account.
///
/// No limit or authorization checks happen here, callers are responsible
/// for deciding whether a movement is allowed.
pub struct AccountLedger<'s, S: ?Sized> {
    store: &'s mut S,
}

impl<'s, S> AccountLedger<'s, S>
where
    S: Store + ?Sized,
{
    pub fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    pub fn list_movements(&self, account_id: &str) -> Result<Vec<Movement>, BankError> {
        self.store
            .find_account(account_id)
            .map(|acc| acc.movements().to_vec())
            .ok_or(BankError::NotFound(ACCOUNT_NOT_FOUND))
    }

    /// Returns `false` when the withdrawal could not be applied or persisted. The
    /// account is left untouched in that case and the caller must not retry.
    pub fn withdraw(&mut self, account: &mut Account, amount: Decimal) -> bool {
        match self.commit(account, MovementKind::Withdrawal, amount) {
            Ok(()) => true,
            Err(err) => {
                warn!(account = account.id(), %amount, %err, "withdrawal not recorded");
                false
            }
        }
    }

    pub fn deposit(&mut self, account: &mut Account, amount: Decimal) -> Result<(), BankError> {
        self.commit(account, MovementKind::Deposit, amount)
    }

    pub fn debit_transfer(
        &mut self,
        account: &mut Account,
        amount: Decimal,
    ) -> Result<(), BankError> {
        self.commit(account, MovementKind::OutgoingTransfer, amount)
    }

    // The movement is staged on a copy, so an overflow or a failed save leaves
    // both the store and the caller's account as they were.
    fn commit(
        &mut self,
        account: &mut Account,
        kind: MovementKind,
        amount: Decimal,
    ) -> Result<(), BankError> {
        let mut staged = account.clone();
        if let Err(err) = staged.record(kind, amount) {
            warn!(account = account.id(), %amount, %err, "movement rejected");
            return Err(BankError::Forbidden(AMOUNT_OUT_OF_RANGE));
        }
        self.store.save_account(&staged)?;
        debug!(
            account = staged.id(),
            ?kind,
            %amount,
            balance = %staged.balance(),
            "movement recorded"
        );
        *account = staged;
        Ok(())
    }
}
