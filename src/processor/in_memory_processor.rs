use crate::{
    authenticator::CardAuthenticator,
    command::{BankCommand, CommandArgs, OperationKind},
    config::{CardPolicy, Config, TransferPolicy},
    ledger::AccountLedger,
    store::in_memory::InMemoryStore,
    transfer::TransferOrchestrator,
};

use super::{CommandProcessor, Outcome, ProcessError};

#[derive(Default)]
pub struct InMemoryBankProcessor {
    pub store: InMemoryStore,
    card_policy: CardPolicy,
    transfer_policy: TransferPolicy,
}

impl InMemoryBankProcessor {
    pub fn from_config(config: Config) -> Self {
        Self {
            store: InMemoryStore::seeded(config.accounts, config.cards, config.banks),
            card_policy: config.card,
            transfer_policy: config.transfer,
        }
    }

    fn execute(&mut self, command: BankCommand) -> Result<Outcome, ProcessError> {
        let outcome = match command {
            BankCommand::ListMovements { account } => {
                Outcome::Movements(AccountLedger::new(&mut self.store).list_movements(&account)?)
            }
            BankCommand::Transfer {
                origin,
                destination,
                amount,
            } => {
                TransferOrchestrator::new(&mut self.store, &self.transfer_policy)
                    .transfer(&origin, &destination, amount)?;
                Outcome::Done
            }
            BankCommand::Withdraw {
                card,
                pin,
                amount,
                bank,
            } => Outcome::Commission(self.cards().withdraw(&card, pin, amount, &bank)?),
            BankCommand::Deposit {
                card,
                pin,
                amount,
                bank,
            } => {
                self.cards().deposit(&card, pin, amount, &bank)?;
                Outcome::Done
            }
            BankCommand::Activate { card, pin } => {
                self.cards().activate(&card, pin)?;
                Outcome::Done
            }
            BankCommand::ChangePin { card, pin, new_pin } => {
                self.cards().change_pin(&card, pin, new_pin)?;
                Outcome::Done
            }
            BankCommand::GetLimit { card, pin } => {
                Outcome::Limit(self.cards().withdrawal_limit(&card, pin)?)
            }
            BankCommand::SetLimit {
                card,
                pin,
                new_limit,
            } => {
                self.cards().set_withdrawal_limit(&card, pin, new_limit)?;
                Outcome::Done
            }
        };
        Ok(outcome)
    }

    fn cards(&mut self) -> CardAuthenticator<'_, InMemoryStore> {
        CardAuthenticator::new(&mut self.store, &self.card_policy)
    }
}

impl CommandProcessor for InMemoryBankProcessor {
    fn process_operation(
        &mut self,
        kind: OperationKind,
        target: &str,
        args: CommandArgs,
    ) -> Result<Outcome, ProcessError> {
        let command = BankCommand::parse_command(kind, target, args)?;
        self.execute(command)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        account::{Account, MovementKind},
        card::{Card, CardKind, PinDigest},
        command::CommandError,
        error::BankError,
        store::Store,
    };

    use super::*;

    fn processor() -> InMemoryBankProcessor {
        InMemoryBankProcessor::from_config(Config {
            accounts: vec![Account::new("ES01", dec!(1000))],
            cards: vec![
                Card::issue("1111", "ES01", CardKind::Debit, dec!(500), dec!(0))
                    .with_pin_digest(PinDigest::of(1234)),
            ],
            ..Default::default()
        })
    }

    fn card_args(pin: u32) -> CommandArgs {
        CommandArgs {
            pin: Some(pin),
            ..Default::default()
        }
    }

    #[test]
    fn process_some_operations() {
        let mut processor = processor();

        let outcome = processor
            .process_operation(OperationKind::Activate, "1111", card_args(1234))
            .unwrap();
        assert_eq!(outcome, Outcome::Done);

        let outcome = processor
            .process_operation(
                OperationKind::Withdraw,
                "1111",
                CommandArgs {
                    amount: Some(dec!(200)),
                    bank: Some("HomeBank".to_string()),
                    ..card_args(1234)
                },
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Commission(dec!(0)));

        processor
            .process_operation(
                OperationKind::Transfer,
                "ES01",
                CommandArgs {
                    amount: Some(dec!(100)),
                    destination: Some("ES77".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let Outcome::Movements(movements) = processor
            .process_operation(OperationKind::Movements, "ES01", CommandArgs::default())
            .unwrap()
        else {
            panic!("expected movements");
        };
        let kinds: Vec<_> = movements.iter().map(|m| (m.kind(), m.amount())).collect();
        assert_eq!(
            kinds,
            vec![
                (MovementKind::Withdrawal, dec!(200)),
                (MovementKind::OutgoingTransfer, dec!(110)),
            ]
        );
        assert_eq!(processor.store.find_account("ES01").unwrap().balance(), dec!(690));

        let outcome = processor
            .process_operation(OperationKind::GetLimit, "1111", card_args(1234))
            .unwrap();
        assert_eq!(outcome, Outcome::Limit(dec!(500)));
    }

    #[test]
    fn errors_are_kept_apart() {
        let mut processor = processor();

        let err = processor
            .process_operation(OperationKind::Activate, "1111", CommandArgs::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::CommandErr(CommandError::PinRequired {
                kind: OperationKind::Activate
            })
        ));

        let err = processor
            .process_operation(OperationKind::GetLimit, "1111", card_args(1234))
            .unwrap_err();
        assert!(matches!(err, ProcessError::BankErr(BankError::Forbidden(_))));

        let err = processor
            .process_operation(OperationKind::Movements, "ES99", CommandArgs::default())
            .unwrap_err();
        assert!(matches!(err, ProcessError::BankErr(BankError::NotFound(_))));
    }

    #[test]
    fn negative_limit_is_out_of_range() {
        let mut processor = processor();
        processor
            .process_operation(OperationKind::Activate, "1111", card_args(1234))
            .unwrap();

        let err = processor
            .process_operation(
                OperationKind::SetLimit,
                "1111",
                CommandArgs {
                    amount: Some(dec!(-600)),
                    ..card_args(1234)
                },
            )
            .unwrap_err();
        assert!(matches!(err, ProcessError::BankErr(BankError::Forbidden(_))));
        assert_eq!(err.to_string(), "limit out of allowed range");

        let outcome = processor
            .process_operation(OperationKind::GetLimit, "1111", card_args(1234))
            .unwrap();
        assert_eq!(outcome, Outcome::Limit(dec!(500)));
    }
}
