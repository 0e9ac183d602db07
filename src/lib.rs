/// Account balance and the movement history documenting it.
/// Every balance change is made by applying a movement.
pub mod account;

/// Card entity, PIN digest and the withdrawal eligibility rules.
pub mod card;

/// Partner bank reference data and lookup by name.
pub mod bank;

/// Error kinds surfaced by the transaction engine.
pub mod error;

/// Policies and seed data, loaded from TOML.
pub mod config;

/// Persistence interface, plus "in memory" implementation.
pub mod store;

/// Mechanical withdraw/deposit/debit steps against a single account.
pub mod ledger;

/// PIN authentication, activation and limit policy for cards.
/// Delegates the actual money movement to [`ledger`].
pub mod authenticator;

/// Outgoing transfers with the foreign IBAN commission.
pub mod transfer;

/// Operations as they arrive from the outside, validated into commands.
pub mod command;

/// Command processor interface, plus "in memory" implementation.
/// Dispatches parsed commands to the authenticator, ledger and transfer orchestrator.
pub mod processor;

/// Bootstrap for the batch binary. Kept in the library so the
/// integration tests can drive it.
pub mod bin_utils;
