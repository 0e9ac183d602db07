use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::{
    account::Account,
    bank::BankDirectory,
    card::{Card, Pin, PinDigest},
    config::CardPolicy,
    error::{
        ACCOUNT_NOT_FOUND, AMOUNT_NOT_POSITIVE, BankError, CARD_ALREADY_ACTIVATED,
        CARD_NOT_ACTIVATED, CARD_NOT_FOUND, DEPOSIT_NOT_PERMITTED, LIMIT_OUT_OF_RANGE, SAME_PIN,
        WITHDRAWAL_ERROR, WITHDRAWAL_NOT_PERMITTED,
    },
    ledger::AccountLedger,
    store::Store,
};

/// PIN gated card operations.
///
/// A card starts inactive and becomes active exactly once, through
/// [`CardAuthenticator::activate`]. Everything else requires an active card
/// and a matching PIN. A wrong PIN is reported the same way as an unknown card.
pub struct CardAuthenticator<'s, S: ?Sized> {
    store: &'s mut S,
    policy: &'s CardPolicy,
}

impl<'s, S> CardAuthenticator<'s, S>
where
    S: Store + ?Sized,
{
    pub fn new(store: &'s mut S, policy: &'s CardPolicy) -> Self {
        Self { store, policy }
    }

    pub fn activate(&mut self, card_id: &str, pin: Pin) -> Result<(), BankError> {
        let mut card = self
            .store
            .find_card(card_id)
            .ok_or(BankError::NotFound(CARD_NOT_FOUND))?;
        if card.is_activated() {
            return Err(BankError::Forbidden(CARD_ALREADY_ACTIVATED));
        }
        card.activate(PinDigest::of(pin));
        self.store.save_card(&card)?;
        info!(card = card_id, "card activated");
        Ok(())
    }

    pub fn authenticate(&self, card_id: &str, pin: Pin) -> Result<Card, BankError> {
        self.store
            .find_card_by_pin(card_id, &PinDigest::of(pin))
            .ok_or(BankError::NotFound(CARD_NOT_FOUND))
    }

    /// Withdraws `amount` from the card's account and returns the commission
    /// charged by the terminal's bank, zero at home.
    pub fn withdraw(
        &mut self,
        card_id: &str,
        pin: Pin,
        amount: Decimal,
        terminal_bank: &str,
    ) -> Result<Decimal, BankError> {
        let card = self.active_card(card_id, pin)?;
        require_positive(amount)?;
        let mut account = self.owning_account(&card)?;

        if !card.can_withdraw(amount, account.balance()) {
            warn!(card = card_id, %amount, "withdrawal rejected");
            return Err(BankError::Forbidden(WITHDRAWAL_NOT_PERMITTED));
        }
        if !AccountLedger::new(&mut *self.store).withdraw(&mut account, amount) {
            return Err(BankError::Forbidden(WITHDRAWAL_ERROR));
        }

        if self.policy.is_home_bank(terminal_bank) {
            Ok(Decimal::ZERO)
        } else {
            let bank = BankDirectory::new(&*self.store).lookup(terminal_bank)?;
            Ok(bank.withdrawal_commission)
        }
    }

    pub fn deposit(
        &mut self,
        card_id: &str,
        pin: Pin,
        amount: Decimal,
        terminal_bank: &str,
    ) -> Result<(), BankError> {
        let card = self.active_card(card_id, pin)?;
        require_positive(amount)?;
        if !self.policy.is_home_bank(terminal_bank) {
            warn!(card = card_id, terminal_bank, "deposit at foreign terminal rejected");
            return Err(BankError::Forbidden(DEPOSIT_NOT_PERMITTED));
        }
        let mut account = self.owning_account(&card)?;
        AccountLedger::new(&mut *self.store).deposit(&mut account, amount)
    }

    pub fn change_pin(&mut self, card_id: &str, pin: Pin, new_pin: Pin) -> Result<(), BankError> {
        let mut card = self.active_card(card_id, pin)?;
        let new_digest = PinDigest::of(new_pin);
        if card.matches_pin(&new_digest) {
            return Err(BankError::Forbidden(SAME_PIN));
        }
        card.replace_pin(new_digest);
        self.store.save_card(&card)?;
        info!(card = card_id, "pin changed");
        Ok(())
    }

    pub fn withdrawal_limit(&self, card_id: &str, pin: Pin) -> Result<Decimal, BankError> {
        Ok(self.active_card(card_id, pin)?.withdrawal_limit())
    }

    pub fn set_withdrawal_limit(
        &mut self,
        card_id: &str,
        pin: Pin,
        new_limit: Decimal,
    ) -> Result<(), BankError> {
        let mut card = self.active_card(card_id, pin)?;
        if !self.policy.allows_limit(new_limit) {
            return Err(BankError::Forbidden(LIMIT_OUT_OF_RANGE));
        }
        card.set_withdrawal_limit(new_limit);
        self.store.save_card(&card)?;
        info!(card = card_id, limit = %new_limit, "withdrawal limit changed");
        Ok(())
    }

    fn active_card(&self, card_id: &str, pin: Pin) -> Result<Card, BankError> {
        let card = self.authenticate(card_id, pin)?;
        if !card.is_activated() {
            return Err(BankError::Forbidden(CARD_NOT_ACTIVATED));
        }
        Ok(card)
    }

    fn owning_account(&self, card: &Card) -> Result<Account, BankError> {
        self.store
            .find_account(card.account())
            .ok_or(BankError::NotFound(ACCOUNT_NOT_FOUND))
    }
}

fn require_positive(amount: Decimal) -> Result<(), BankError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(BankError::Forbidden(AMOUNT_NOT_POSITIVE))
    }
}
