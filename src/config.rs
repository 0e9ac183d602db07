use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{account::Account, bank::Bank, card::Card};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Rules the card authenticator enforces.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardPolicy {
    /// Terminals of this bank charge no withdrawal commission and are the only ones accepting deposits.
    pub home_bank: String,
    pub min_withdrawal_limit: Decimal,
    pub max_withdrawal_limit: Decimal,
}

impl Default for CardPolicy {
    fn default() -> Self {
        Self {
            home_bank: "HomeBank".to_string(),
            min_withdrawal_limit: Decimal::new(500, 0),
            max_withdrawal_limit: Decimal::new(6000, 0),
        }
    }
}

impl CardPolicy {
    pub fn is_home_bank(&self, bank: &str) -> bool {
        self.home_bank == bank
    }

    pub fn allows_limit(&self, limit: Decimal) -> bool {
        (self.min_withdrawal_limit..=self.max_withdrawal_limit).contains(&limit)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransferPolicy {
    /// Unknown destinations starting with this code are treated as valid foreign IBANs.
    pub home_country_code: String,
    /// Flat rate charged on top of transfers to foreign IBANs, `0.1` means 10%.
    pub commission_rate: Decimal,
}

impl Default for TransferPolicy {
    fn default() -> Self {
        Self {
            home_country_code: "ES".to_string(),
            commission_rate: Decimal::new(1, 1),
        }
    }
}

/// Engine policies plus the reference and seed data the in-memory store starts with.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub card: CardPolicy,
    pub transfer: TransferPolicy,
    pub banks: Vec<Bank>,
    pub accounts: Vec<Account>,
    pub cards: Vec<Card>,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }
}
