use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::{
    config::TransferPolicy,
    error::{AMOUNT_NOT_POSITIVE, AMOUNT_OUT_OF_RANGE, BankError, ORIGIN_NOT_FOUND},
    ledger::AccountLedger,
    store::Store,
};

/// Format check for destinations that are not accounts of this bank.
#[derive(Debug, Clone)]
pub struct IbanPolicy<'p> {
    country_code: &'p str,
}

impl<'p> IbanPolicy<'p> {
    pub fn new(country_code: &'p str) -> Self {
        Self { country_code }
    }

    /// Only the country prefix is checked, no length or checksum validation.
    pub fn is_valid(&self, iban: &str) -> bool {
        iban.starts_with(self.country_code)
    }
}

/// Moves money out of an account towards a local account or an external IBAN.
///
/// Only the origin is debited. Crediting the destination is left to whoever
/// owns it, even when the destination is one of our own accounts.
pub struct TransferOrchestrator<'s, S: ?Sized> {
    store: &'s mut S,
    policy: &'s TransferPolicy,
}

impl<'s, S> TransferOrchestrator<'s, S>
where
    S: Store + ?Sized,
{
    pub fn new(store: &'s mut S, policy: &'s TransferPolicy) -> Self {
        Self { store, policy }
    }

    /// Multiplier applied to the transferred amount.
    pub fn commission_factor(&self, destination: &str) -> Decimal {
        if self.store.find_account(destination).is_some() {
            return Decimal::ONE;
        }
        if IbanPolicy::new(&self.policy.home_country_code).is_valid(destination) {
            Decimal::ONE + self.policy.commission_rate
        } else {
            warn!(destination, "destination is neither a local account nor a valid IBAN");
            Decimal::ONE
        }
    }

    /// Insufficient funds is not an error: nothing is debited or recorded and
    /// the call still succeeds.
    pub fn transfer(
        &mut self,
        origin_id: &str,
        destination: &str,
        amount: Decimal,
    ) -> Result<(), BankError> {
        let mut origin = self
            .store
            .find_account(origin_id)
            .ok_or(BankError::NotFound(ORIGIN_NOT_FOUND))?;
        if amount <= Decimal::ZERO {
            return Err(BankError::Forbidden(AMOUNT_NOT_POSITIVE));
        }
        let effective_amount = amount
            .checked_mul(self.commission_factor(destination))
            .ok_or(BankError::Forbidden(AMOUNT_OUT_OF_RANGE))?;

        if origin.balance() < effective_amount {
            info!(
                origin = origin_id,
                destination,
                amount = %effective_amount,
                balance = %origin.balance(),
                "transfer skipped, insufficient funds"
            );
            return Ok(());
        }
        AccountLedger::new(&mut *self.store).debit_transfer(&mut origin, effective_amount)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        account::{Account, MovementKind},
        bank::Bank,
        store::in_memory::InMemoryStore,
    };

    use super::*;

    fn transfer(store: &mut InMemoryStore, origin: &str, destination: &str, amount: Decimal) {
        let policy = TransferPolicy::default();
        TransferOrchestrator::new(store, &policy)
            .transfer(origin, destination, amount)
            .unwrap();
    }

    #[test]
    fn iban_prefix_check() {
        let policy = IbanPolicy::new("ES");
        assert!(policy.is_valid("ES9121000418450200051332"));
        assert!(!policy.is_valid("FR7630006000011234567890189"));
        assert!(!policy.is_valid("es91"));
        assert!(!policy.is_valid(""));
    }

    #[test]
    fn transfer_to_local_account() {
        let mut store = InMemoryStore::seeded(
            [Account::new("ES01", dec!(1000)), Account::new("ES02", dec!(0))],
            [],
            [],
        );
        transfer(&mut store, "ES01", "ES02", dec!(100));

        let origin = store.find_account("ES01").unwrap();
        assert_eq!(origin.balance(), dec!(900));
        assert_eq!(origin.movements().len(), 1);
        assert_eq!(origin.movements()[0].kind(), MovementKind::OutgoingTransfer);
        assert_eq!(origin.movements()[0].amount(), dec!(100));

        // the destination is not credited
        let destination = store.find_account("ES02").unwrap();
        assert_eq!(destination.balance(), dec!(0));
        assert!(destination.movements().is_empty());
    }

    #[test]
    fn transfer_to_foreign_iban_applies_commission() {
        let mut store = InMemoryStore::seeded([Account::new("ES123", dec!(200))], [], []);
        transfer(&mut store, "ES123", "ES456", dec!(100));

        let origin = store.find_account("ES123").unwrap();
        assert_eq!(origin.balance(), dec!(90));
        assert_eq!(origin.movements()[0].amount(), dec!(110));
    }

    #[test]
    fn transfer_to_unresolved_destination_has_no_commission() {
        let mut store = InMemoryStore::seeded([Account::new("ES123", dec!(200))], [], []);
        transfer(&mut store, "ES123", "FR456", dec!(100));

        assert_eq!(store.find_account("ES123").unwrap().balance(), dec!(100));
    }

    #[test]
    fn commission_rate_comes_from_policy() {
        let mut store = InMemoryStore::seeded([Account::new("ES123", dec!(200))], [], []);
        let policy = TransferPolicy {
            home_country_code: "PT".to_string(),
            commission_rate: dec!(0.25),
        };
        let orchestrator = TransferOrchestrator::new(&mut store, &policy);
        assert_eq!(orchestrator.commission_factor("PT50000201231234567890154"), dec!(1.25));
        assert_eq!(orchestrator.commission_factor("ES456"), dec!(1));
        assert_eq!(orchestrator.commission_factor("ES123"), dec!(1));
    }

    #[test]
    fn partner_bank_transfer_rate_is_not_charged() {
        let banks = [Bank {
            id: 1,
            name: "Banco Madrid".to_string(),
            withdrawal_commission: dec!(2.5),
            transfer_commission: dec!(0.5),
        }];
        let mut store = InMemoryStore::seeded([Account::new("ES123", dec!(200))], [], banks);
        transfer(&mut store, "ES123", "ES456", dec!(100));

        assert_eq!(store.find_account("ES123").unwrap().balance(), dec!(90));
    }

    // Surprising but kept: the caller cannot tell this apart from a successful transfer.
    #[test]
    fn insufficient_funds_is_a_silent_noop() {
        let mut store = InMemoryStore::seeded([Account::new("ES123", dec!(50))], [], []);
        transfer(&mut store, "ES123", "ES456", dec!(100));

        let origin = store.find_account("ES123").unwrap();
        assert_eq!(origin.balance(), dec!(50));
        assert!(origin.movements().is_empty());

        // commission pushes the amount over the balance
        let mut store = InMemoryStore::seeded([Account::new("ES123", dec!(105))], [], []);
        transfer(&mut store, "ES123", "ES456", dec!(100));
        assert_eq!(store.find_account("ES123").unwrap().balance(), dec!(105));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let mut store = InMemoryStore::seeded([Account::new("ES01", dec!(100))], [], []);
        let policy = TransferPolicy::default();
        let mut orchestrator = TransferOrchestrator::new(&mut store, &policy);

        for amount in [dec!(0), dec!(-50)] {
            let err = orchestrator.transfer("ES01", "ES02", amount).unwrap_err();
            assert!(matches!(err, BankError::Forbidden(_)));
            assert_eq!(err.to_string(), "amount must be positive");
        }
        let origin = store.find_account("ES01").unwrap();
        assert_eq!(origin.balance(), dec!(100));
        assert!(origin.movements().is_empty());
    }

    #[test]
    fn commission_overflow_is_rejected() {
        let mut store = InMemoryStore::seeded([Account::new("ES01", Decimal::MAX)], [], []);
        let policy = TransferPolicy::default();
        let mut orchestrator = TransferOrchestrator::new(&mut store, &policy);

        let err = orchestrator
            .transfer("ES01", "ES999", Decimal::MAX)
            .unwrap_err();
        assert!(matches!(err, BankError::Forbidden(_)));
        assert_eq!(err.to_string(), "amount out of range");

        let err = orchestrator
            .transfer("ES01", "ES999", dec!(73000000000000000000000000000))
            .unwrap_err();
        assert!(matches!(err, BankError::Forbidden(_)));

        // no commission, nothing to overflow
        orchestrator
            .transfer("ES01", "FR999", Decimal::MAX)
            .unwrap();
        assert_eq!(store.find_account("ES01").unwrap().balance(), dec!(0));
    }

    #[test]
    fn unknown_origin() {
        let mut store = InMemoryStore::default();
        let policy = TransferPolicy::default();
        let err = TransferOrchestrator::new(&mut store, &policy)
            .transfer("ES01", "ES02", dec!(1))
            .unwrap_err();
        assert!(matches!(err, BankError::NotFound(_)));
        assert_eq!(err.to_string(), "origin account does not exist");
    }
}
