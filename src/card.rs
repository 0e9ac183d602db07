use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::account::AccountId;

pub type CardId = String;
pub type Pin = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Debit,
    Credit,
}

/// Hex encoded SHA-256 of the PIN's decimal form.
///
/// There is no salt, so anyone with the digest can brute force the
/// ten thousand four digit PINs in no time. Good enough for a demo bank only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinDigest(String);

impl PinDigest {
    pub fn of(pin: Pin) -> Self {
        let hash = Sha256::digest(pin.to_string().as_bytes());
        Self(format!("{hash:x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PinDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    account: AccountId,
    kind: CardKind,
    #[serde(default)]
    expiry_month: u8,
    #[serde(default)]
    expiry_year: u16,
    #[serde(default)]
    cvv: u16,
    #[serde(default)]
    pin_digest: Option<PinDigest>,
    #[serde(default)]
    activated: bool,
    withdrawal_limit: Decimal,
    #[serde(default)]
    credit_limit: Decimal,
}

impl Card {
    /// New, not yet activated card without a PIN.
    pub fn issue(
        id: impl Into<CardId>,
        account: impl Into<AccountId>,
        kind: CardKind,
        withdrawal_limit: Decimal,
        credit_limit: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            account: account.into(),
            kind,
            expiry_month: 0,
            expiry_year: 0,
            cvv: 0,
            pin_digest: None,
            activated: false,
            withdrawal_limit,
            credit_limit,
        }
    }

    pub fn with_expiry(mut self, month: u8, year: u16, cvv: u16) -> Self {
        self.expiry_month = month;
        self.expiry_year = year;
        self.cvv = cvv;
        self
    }

    /// Provisions a digest for a card that was handed out with a PIN already set.
    pub fn with_pin_digest(mut self, digest: PinDigest) -> Self {
        self.pin_digest = Some(digest);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    pub fn expiry(&self) -> (u8, u16) {
        (self.expiry_month, self.expiry_year)
    }

    pub fn cvv(&self) -> u16 {
        self.cvv
    }

    pub fn pin_digest(&self) -> Option<&PinDigest> {
        self.pin_digest.as_ref()
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn withdrawal_limit(&self) -> Decimal {
        self.withdrawal_limit
    }

    pub fn credit_limit(&self) -> Decimal {
        self.credit_limit
    }

    pub fn matches_pin(&self, digest: &PinDigest) -> bool {
        self.pin_digest.as_ref() == Some(digest)
    }

    /// Whether `amount` may be withdrawn given the owning account's balance.
    pub fn can_withdraw(&self, amount: Decimal, balance: Decimal) -> bool {
        let within_funds = match self.kind {
            CardKind::Debit => amount <= balance,
            CardKind::Credit => amount <= self.credit_limit,
        };
        within_funds && amount <= self.withdrawal_limit
    }

    pub(crate) fn activate(&mut self, digest: PinDigest) {
        self.activated = true;
        self.pin_digest = Some(digest);
    }

    pub(crate) fn replace_pin(&mut self, digest: PinDigest) {
        self.pin_digest = Some(digest);
    }

    pub(crate) fn set_withdrawal_limit(&mut self, limit: Decimal) {
        self.withdrawal_limit = limit;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn digest_is_sha256_hex_of_decimal_pin() {
        assert_eq!(
            PinDigest::of(1234).as_str(),
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
        assert_eq!(PinDigest::of(1234), PinDigest::of(1234));
        assert_ne!(PinDigest::of(1234), PinDigest::of(4321));
        assert_eq!(PinDigest::of(42).as_str().len(), 64);
    }

    #[test]
    fn debit_eligibility() {
        let card = Card::issue("1111", "ES01", CardKind::Debit, dec!(500), dec!(0));
        assert!(card.can_withdraw(dec!(500), dec!(1000)));
        assert!(card.can_withdraw(dec!(300), dec!(300)));
        // above limit
        assert!(!card.can_withdraw(dec!(501), dec!(1000)));
        // above balance
        assert!(!card.can_withdraw(dec!(400), dec!(399)));
    }

    #[test]
    fn credit_eligibility_ignores_balance() {
        let card = Card::issue("2222", "ES01", CardKind::Credit, dec!(1000), dec!(800));
        assert!(card.can_withdraw(dec!(800), dec!(0)));
        assert!(!card.can_withdraw(dec!(801), dec!(5000)));

        let card = Card::issue("2222", "ES01", CardKind::Credit, dec!(500), dec!(800));
        assert!(!card.can_withdraw(dec!(600), dec!(5000)));
    }

    #[test]
    fn activation_sets_digest() {
        let mut card = Card::issue("1111", "ES01", CardKind::Debit, dec!(500), dec!(0));
        assert!(!card.is_activated());
        assert!(card.pin_digest().is_none());
        assert!(!card.matches_pin(&PinDigest::of(1234)));

        card.activate(PinDigest::of(1234));
        assert!(card.is_activated());
        assert!(card.matches_pin(&PinDigest::of(1234)));
        assert!(!card.matches_pin(&PinDigest::of(1235)));
    }
}
