use std::collections::HashMap;

use crate::{
    account::{Account, AccountId},
    bank::Bank,
    card::{Card, CardId, PinDigest},
};

use super::{Store, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    accounts: HashMap<AccountId, Account>,
    cards: HashMap<CardId, Card>,
    // keyed by name, the only way banks are looked up
    banks: HashMap<String, Bank>,
}

impl InMemoryStore {
    pub fn seeded(
        accounts: impl IntoIterator<Item = Account>,
        cards: impl IntoIterator<Item = Card>,
        banks: impl IntoIterator<Item = Bank>,
    ) -> Self {
        let mut store = Self::default();
        accounts.into_iter().for_each(|acc| store.insert_account(acc));
        cards.into_iter().for_each(|card| store.insert_card(card));
        banks.into_iter().for_each(|bank| store.insert_bank(bank));
        store
    }

    pub fn insert_account(&mut self, account: Account) {
        self.accounts.insert(account.id().to_owned(), account);
    }

    pub fn insert_card(&mut self, card: Card) {
        self.cards.insert(card.id().to_owned(), card);
    }

    pub fn insert_bank(&mut self, bank: Bank) {
        self.banks.insert(bank.name.clone(), bank);
    }

    /// Accounts ordered by id.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<_> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }
}

impl Store for InMemoryStore {
    fn find_account(&self, id: &str) -> Option<Account> {
        self.accounts.get(id).cloned()
    }

    fn save_account(&mut self, account: &Account) -> Result<(), StoreError> {
        self.insert_account(account.clone());
        Ok(())
    }

    fn find_card(&self, id: &str) -> Option<Card> {
        self.cards.get(id).cloned()
    }

    fn find_card_by_pin(&self, id: &str, digest: &PinDigest) -> Option<Card> {
        self.cards
            .get(id)
            .filter(|card| card.matches_pin(digest))
            .cloned()
    }

    fn save_card(&mut self, card: &Card) -> Result<(), StoreError> {
        self.insert_card(card.clone());
        Ok(())
    }

    fn find_bank_by_name(&self, name: &str) -> Option<Bank> {
        self.banks.get(name).cloned()
    }
}
