use std::io::Write;

use anyhow::Context;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::Account;

/// Final state of an account as written to the summary.
#[derive(Debug, Serialize)]
struct AccountRow<'a> {
    account: &'a str,
    balance: Decimal,
    movements: usize,
}

impl<'a> From<&'a Account> for AccountRow<'a> {
    fn from(acc: &'a Account) -> Self {
        Self {
            account: acc.id(),
            balance: acc.balance().normalize(),
            movements: acc.movements().len(),
        }
    }
}

/// Writes one `account,balance,movements` row per account, in the given order.
pub fn print_accounts<W: Write>(output: &mut W, accounts: &[&Account]) -> anyhow::Result<()> {
    let mut writer = Writer::from_writer(output);
    for &acc in accounts {
        writer
            .serialize(AccountRow::from(acc))
            .with_context(|| format!("Failed to write account `{}`", acc.id()))?;
    }
    writer.flush().context("Failed to flush account summary")?;
    Ok(())
}
